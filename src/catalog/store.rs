//! In-memory catalog and the shared, atomically reloadable snapshot.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use super::song::Song;
use super::{CatalogError, CatalogQuery, SongSelection};
use crate::mood::label_key;

/// Ranked songs returned per query.
pub const TOP_RANKED_LIMIT: usize = 5;
/// Unranked songs sampled per query.
pub const OTHER_SAMPLE_LIMIT: usize = 10;

// ── In-Memory Catalog ──────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    songs: Vec<Song>,
}

impl InMemoryCatalog {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Load a JSON array of songs.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let songs: Vec<Song> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(songs = songs.len(), path = %path.display(), "Loaded song catalog");
        Ok(Self::new(songs))
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Distinct song languages, sorted, for building a language picker.
    pub fn languages(&self) -> Vec<String> {
        self.songs
            .iter()
            .map(|s| s.language.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Same as [`CatalogQuery::find`], drawing the unranked sample from `rng`.
    pub fn find_with_rng<R: Rng + ?Sized>(
        &self,
        mood: &str,
        language: Option<&str>,
        rng: &mut R,
    ) -> SongSelection {
        let mood = label_key(mood);
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase);

        let matching: Vec<&Song> = self
            .songs
            .iter()
            .filter(|s| label_key(&s.mood) == mood)
            .filter(|s| {
                language
                    .as_deref()
                    .map_or(true, |l| s.language.trim().to_lowercase() == l)
            })
            .collect();

        let mut ranked: Vec<Song> = matching
            .iter()
            .filter(|s| s.is_ranked())
            .map(|s| (*s).clone())
            .collect();
        ranked.sort_by_key(|s| s.rank);
        ranked.truncate(TOP_RANKED_LIMIT);

        let unranked: Vec<&Song> = matching.into_iter().filter(|s| !s.is_ranked()).collect();
        let others: Vec<Song> = if unranked.len() > OTHER_SAMPLE_LIMIT {
            unranked
                .choose_multiple(rng, OTHER_SAMPLE_LIMIT)
                .map(|s| (*s).clone())
                .collect()
        } else {
            unranked.into_iter().cloned().collect()
        };

        tracing::debug!(
            mood = %mood,
            language = ?language,
            ranked = ranked.len(),
            others = others.len(),
            "Catalog query"
        );

        SongSelection { ranked, others }
    }
}

impl CatalogQuery for InMemoryCatalog {
    fn find(&self, mood: &str, language: Option<&str>) -> SongSelection {
        self.find_with_rng(mood, language, &mut rand::thread_rng())
    }
}

// ── Shared Catalog ─────────────────────────────────────────

/// Read-mostly handle to the current catalog.
///
/// Readers take an `Arc` snapshot and query it without holding the lock;
/// `replace` and `reload` swap the whole snapshot at once.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    current: Arc<RwLock<Arc<InMemoryCatalog>>>,
}

impl SharedCatalog {
    pub fn new(catalog: InMemoryCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    pub fn snapshot(&self) -> Arc<InMemoryCatalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn replace(&self, catalog: InMemoryCatalog) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(catalog);
    }

    /// Load `path` and swap it in. On error the current snapshot is kept.
    pub fn reload(&self, path: &Path) -> Result<usize, CatalogError> {
        let catalog = InMemoryCatalog::load(path)?;
        let count = catalog.len();
        self.replace(catalog);
        tracing::info!(songs = count, "Catalog snapshot replaced");
        Ok(count)
    }
}

impl CatalogQuery for SharedCatalog {
    fn find(&self, mood: &str, language: Option<&str>) -> SongSelection {
        self.snapshot().find(mood, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    fn song(title: &str, mood: &str, rank: u32, language: &str) -> Song {
        Song {
            title: title.into(),
            link: format!("https://youtu.be/{}", title),
            mood: mood.into(),
            rank,
            language: language.into(),
        }
    }

    fn sample_catalog() -> InMemoryCatalog {
        let mut songs = vec![
            song("r3", "Happy", 3, "English"),
            song("r1", "happy", 1, "Hindi"),
            song("r2", "HAPPY", 2, "English"),
            song("r4", "Happy", 4, "English"),
            song("r5", "Happy", 5, "Hindi"),
            song("r6", "Happy", 6, "English"),
            song("sad1", "Sad", 1, "English"),
        ];
        for i in 0..14 {
            let language = if i % 2 == 0 { "English" } else { "Hindi" };
            songs.push(song(&format!("o{}", i), "Happy", 0, language));
        }
        InMemoryCatalog::new(songs)
    }

    #[test]
    fn ranked_songs_sorted_and_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        let selection = sample_catalog().find_with_rng("Happy", None, &mut rng);
        let titles: Vec<_> = selection.ranked.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["r1", "r2", "r3", "r4", "r5"]);
    }

    #[test]
    fn unranked_songs_sampled_to_limit() {
        let mut rng = StdRng::seed_from_u64(7);
        let selection = sample_catalog().find_with_rng("happy", None, &mut rng);
        assert_eq!(selection.others.len(), OTHER_SAMPLE_LIMIT);
        assert!(selection.others.iter().all(|s| s.rank == 0 && s.mood == "Happy"));

        let unique: BTreeSet<_> = selection.others.iter().map(|s| &s.title).collect();
        assert_eq!(unique.len(), OTHER_SAMPLE_LIMIT);
    }

    #[test]
    fn small_unranked_pool_returned_whole() {
        let mut rng = StdRng::seed_from_u64(1);
        let selection = sample_catalog().find_with_rng("Happy", Some("hindi"), &mut rng);

        let ranked: Vec<_> = selection.ranked.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(ranked, vec!["r1", "r5"]);
        assert_eq!(selection.others.len(), 7);
        assert!(selection.others.iter().all(|s| s.language == "Hindi"));
    }

    #[test]
    fn blank_or_all_language_means_no_filter() {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(3);
        for language in [None, Some(""), Some("  "), Some("All")] {
            let selection = catalog.find_with_rng("Happy", language, &mut rng);
            assert_eq!(selection.ranked.len(), TOP_RANKED_LIMIT, "language {:?}", language);
        }
    }

    #[test]
    fn no_match_yields_empty_selection() {
        let selection = sample_catalog().find("Devotional", Some("Tamil"));
        assert!(selection.is_empty());
        assert!(selection.ranked.is_empty());
        assert!(selection.others.is_empty());
    }

    #[test]
    fn mood_lookup_folds_non_ascii_case() {
        let catalog = InMemoryCatalog::new(vec![
            song("w1", "Ärger", 1, "German"),
            song("w2", "ÄRGER", 0, "German"),
        ]);
        let selection = catalog.find("ärger", None);
        assert_eq!(selection.ranked[0].title, "w1");
        assert_eq!(selection.others[0].title, "w2");
    }

    #[test]
    fn languages_are_distinct_and_sorted() {
        assert_eq!(sample_catalog().languages(), vec!["English", "Hindi"]);
    }

    #[test]
    fn load_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title":"A","link":"https://youtu.be/a","mood":"Chill","rank":1,"language":"English"}},
               {{"title":"B","link":"https://youtu.be/b","mood":"Chill"}}]"#
        )
        .unwrap();

        let catalog = InMemoryCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.songs()[1].rank, 0);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = InMemoryCatalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { ref path, .. } if path == file.path()));
    }

    #[test]
    fn shared_catalog_swaps_snapshot_on_reload() {
        let shared = SharedCatalog::new(InMemoryCatalog::new(vec![song("old", "Sad", 1, "")]));
        let before = shared.snapshot();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title":"new","link":"x","mood":"Sad","rank":1}},{{"title":"n2","link":"y","mood":"Sad","rank":2}}]"#
        )
        .unwrap();
        assert_eq!(shared.reload(file.path()).unwrap(), 2);

        // Existing snapshots are unaffected by the swap.
        assert_eq!(before.songs()[0].title, "old");
        assert_eq!(shared.find("sad", None).ranked[0].title, "new");
    }

    #[test]
    fn failed_reload_keeps_current_snapshot() {
        let shared = SharedCatalog::new(InMemoryCatalog::new(vec![song("keep", "Sad", 1, "")]));
        let missing = std::path::Path::new("/definitely/not/here/songs.json");

        assert!(matches!(shared.reload(missing), Err(CatalogError::Io { .. })));
        assert_eq!(shared.snapshot().songs()[0].title, "keep");
    }
}
