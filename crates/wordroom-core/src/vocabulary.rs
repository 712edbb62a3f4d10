use std::path::Path;

use rand::seq::IndexedRandom;

use crate::error::{StorageError, VocabError};
use crate::storage::{self, Fingerprint, Storage};
use crate::table::{self, Cell, CellKind, TableDataSource, TableLocation, TableSection};
use crate::words::{Section, Words};

/// A stale entry removed by [`Vocabulary::set_word`], kept until
/// [`Vocabulary::del_dup_word`] reports it.
#[derive(Debug)]
struct RemovedDuplicate {
    word: String,
    section: Section,
    location: Option<TableLocation>,
}

/// The user's words: notes, history and the current search.
///
/// Every mutation is written through to the storage before it returns. If
/// the write fails the in-memory change is undone.
pub struct Vocabulary {
    words: Words,
    query: String,
    full_text: bool,
    storage: Box<dyn Storage>,
    fingerprint: Option<Fingerprint>,
    removed: Option<RemovedDuplicate>,
    /// In-memory words that were never written, e.g. the default dataset
    dirty: bool,
}

impl Vocabulary {
    /// Load the vocabulary, falling back to the default dataset and then to
    /// an empty one. Never fails.
    pub fn open(storage: impl Storage + 'static) -> Self {
        let (mut words, mut dirty, from_file) = match storage.load() {
            Ok(words) => (words, false, true),
            Err(e) => {
                tracing::warn!("{}, loading the default vocabulary", e);
                let words = storage.load_default().unwrap_or_else(|e| {
                    tracing::warn!("{}, starting with an empty vocabulary", e);
                    Words::default()
                });
                // An unreadable file stays on disk until the user changes something
                (words, matches!(e, StorageError::Missing(_)), false)
            }
        };

        let dropped = words.dedupe();
        if dropped > 0 {
            tracing::warn!("Dropped {} history entries that also had notes", dropped);
            dirty |= from_file;
        }
        tracing::info!(
            "Loaded {} words with notes and {} from history",
            words.notes.len(),
            words.history.len()
        );

        let fingerprint = storage.fingerprint();
        Self {
            words,
            query: String::new(),
            full_text: false,
            storage: Box::new(storage),
            fingerprint,
            removed: None,
            dirty,
        }
    }

    pub fn words(&self) -> &Words {
        &self.words
    }

    /// Add a word, or update it if it already exists.
    ///
    /// Words with notes go to the notes section, others to history. A copy
    /// of the word in the other section is removed in the same write; call
    /// [`Vocabulary::del_dup_word`] afterwards to learn where that row was.
    ///
    /// Returns the row to insert, or `None` when the word already existed or
    /// is hidden by the current query.
    pub fn set_word(&mut self, word: &str, notes: &str) -> Result<Option<TableLocation>, VocabError> {
        self.removed = None;
        let word = word.trim();
        if word.is_empty() {
            return Ok(None);
        }

        self.sync();

        let section = Section::for_notes(notes);
        let other = section.other();
        let is_new = !self.words.get(section).contains_key(word);
        let duplicate = self
            .words
            .get(other)
            .contains_key(word)
            .then(|| self.location_of(other, word));

        let previous = self.words.clone();
        self.words
            .get_mut(section)
            .insert(word.to_string(), notes.to_string());
        self.words.get_mut(other).remove(word);
        self.commit(previous)?;

        self.removed = duplicate.map(|location| RemovedDuplicate {
            word: word.to_string(),
            section: other,
            location,
        });

        if !is_new {
            return Ok(None);
        }
        Ok(self.location_of(section, word))
    }

    /// Remove `word` from the section `notes` says it must not be in.
    ///
    /// Returns the row the word occupied there before removal, if it was
    /// visible.
    pub fn del_dup_word(&mut self, word: &str, notes: &str) -> Result<Option<TableLocation>, VocabError> {
        let word = word.trim();
        if word.is_empty() {
            return Ok(None);
        }
        let stale = Section::for_notes(notes).other();

        if let Some(removed) = self
            .removed
            .take_if(|removed| removed.word == word && removed.section == stale)
        {
            return Ok(removed.location);
        }

        if !self.words.get(stale).contains_key(word) {
            return Ok(None);
        }

        let location = self.location_of(stale, word);
        let previous = self.words.clone();
        self.words.get_mut(stale).remove(word);
        self.commit(previous)?;
        Ok(location)
    }

    /// Notes for a word, or an empty string if it has none.
    pub fn get_notes(&self, word: &str) -> &str {
        self.words
            .notes
            .get(word.trim())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Filter listings by `query`. An empty query shows everything.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Also match the query inside notes.
    pub fn toggle_full_text(&mut self, enabled: bool) {
        self.full_text = enabled;
    }

    pub fn full_text(&self) -> bool {
        self.full_text
    }

    /// Words of a section that match the query, sorted case-insensitively.
    pub fn list_words(&self, section: Section) -> Vec<&str> {
        let query = self.query.to_lowercase();
        let mut words: Vec<&str> = self
            .words
            .get(section)
            .iter()
            .filter(|(word, notes)| query.is_empty() || self.matches(section, word, notes, &query))
            .map(|(word, _)| word.as_str())
            .collect();
        words.sort_by_cached_key(|word| word.to_lowercase());
        words
    }

    fn matches(&self, section: Section, word: &str, notes: &str, query: &str) -> bool {
        if word.to_lowercase().starts_with(query) {
            return true;
        }
        self.full_text && section == Section::Notes && notes.to_lowercase().contains(query)
    }

    pub fn count_words(&self, section: Section) -> usize {
        self.list_words(section).len()
    }

    /// Delete a word. Deleting a word that isn't there does nothing.
    pub fn delete_word(&mut self, section: Section, word: &str) -> Result<bool, VocabError> {
        self.removed = None;
        let word = word.trim();
        if !self.words.get(section).contains_key(word) {
            return Ok(false);
        }

        let previous = self.words.clone();
        self.words.get_mut(section).remove(word);
        self.commit(previous)?;
        Ok(true)
    }

    /// Delete several rows at once, returning the deleted words.
    ///
    /// All locations are resolved against the current view before anything
    /// is deleted, so their order does not matter. Suggestion rows, rows out
    /// of range and repeated locations are skipped.
    pub fn delete_multiple(&mut self, locations: &[TableLocation]) -> Result<Vec<String>, VocabError> {
        self.removed = None;
        let mut resolved: Vec<(Section, String)> = Vec::new();
        for location in locations {
            match self.resolve(*location) {
                Some(entry) if !resolved.contains(&entry) => resolved.push(entry),
                Some(_) => {}
                None => tracing::debug!("Skipping {}: no deletable word there", location),
            }
        }

        if resolved.is_empty() {
            return Ok(vec![]);
        }

        let previous = self.words.clone();
        for (section, word) in &resolved {
            self.words.get_mut(*section).remove(word);
        }
        self.commit(previous)?;
        tracing::info!("Deleted {} words", resolved.len());

        Ok(resolved.into_iter().map(|(_, word)| word).collect())
    }

    /// A random word with notes.
    pub fn random_word(&self) -> Result<String, VocabError> {
        let words: Vec<&String> = self.words.notes.keys().collect();
        words
            .choose(&mut rand::rng())
            .map(|word| word.to_string())
            .ok_or(VocabError::EmptyCollection)
    }

    /// Write anything not yet on disk. Returns whether the file was written.
    ///
    /// Mutations write through, so this only persists the state `open` fell
    /// back to when the data file was missing. A data file that changed on
    /// disk since it was last read or written is never overwritten.
    pub fn save(&mut self) -> Result<bool, VocabError> {
        if !self.dirty {
            return Ok(false);
        }

        let current = self.storage.fingerprint();
        if current.is_some() && current != self.fingerprint {
            tracing::warn!("Data file changed on disk, not overwriting it");
            return Ok(false);
        }

        self.storage.save(&self.words)?;
        self.fingerprint = self.storage.fingerprint();
        self.dirty = false;
        Ok(true)
    }

    /// Replace the vocabulary with the contents of another file.
    ///
    /// Unlike loading at startup, a missing or malformed file is an error and
    /// leaves the vocabulary untouched.
    pub fn import(&mut self, path: &Path) -> Result<(), VocabError> {
        self.removed = None;
        let mut words = storage::read_words(path)?;
        words.dedupe();

        let previous = std::mem::replace(&mut self.words, words);
        self.commit(previous)?;
        tracing::info!("Imported {} words from {}", self.words.len(), path.display());
        Ok(())
    }

    /// Write the vocabulary to another file in the storage format.
    pub fn export(&self, path: &Path) -> Result<(), VocabError> {
        storage::write_words(path, &self.words)?;
        tracing::info!("Exported {} words to {}", self.words.len(), path.display());
        Ok(())
    }

    /// Renderer location of a word in the current view.
    fn location_of(&self, section: Section, word: &str) -> Option<TableLocation> {
        let row = self.list_words(section).iter().position(|w| *w == word)?;
        Some(TableLocation::new(
            table::table_index(section, self.is_searching()),
            row,
        ))
    }

    /// The word shown at a renderer location.
    fn resolve(&self, location: TableLocation) -> Option<(Section, String)> {
        match table::project(location.section, self.is_searching())? {
            TableSection::Suggestion => None,
            TableSection::Words(section) => self
                .list_words(section)
                .get(location.row)
                .map(|word| (section, word.to_string())),
        }
    }

    /// Pick up a data file that was replaced behind our back, e.g. by sync.
    fn sync(&mut self) {
        let current = self.storage.fingerprint();
        if current.is_none() || current == self.fingerprint {
            return;
        }

        match self.storage.load() {
            Ok(mut words) => {
                words.dedupe();
                tracing::info!("Data file changed on disk, reloading");
                self.words = words;
                self.fingerprint = current;
                self.dirty = false;
            }
            Err(e) => tracing::warn!("Data file changed but could not be reloaded: {}", e),
        }
    }

    fn commit(&mut self, previous: Words) -> Result<(), VocabError> {
        match self.storage.save(&self.words) {
            Ok(()) => {
                self.fingerprint = self.storage.fingerprint();
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to save vocabulary, undoing change: {}", e);
                self.words = previous;
                Err(e.into())
            }
        }
    }
}

impl TableDataSource for Vocabulary {
    fn number_of_sections(&self) -> usize {
        table::section_count(self.is_searching())
    }

    fn title_for_header(&self, section: usize) -> &str {
        match table::project(section, self.is_searching()) {
            Some(TableSection::Words(section)) => section.title(),
            Some(TableSection::Suggestion) | None => "",
        }
    }

    fn number_of_rows(&self, section: usize) -> usize {
        match table::project(section, self.is_searching()) {
            Some(TableSection::Suggestion) => 1,
            Some(TableSection::Words(section)) => self.count_words(section),
            None => 0,
        }
    }

    fn cell_for_row(&self, section: usize, row: usize) -> Option<Cell> {
        match table::project(section, self.is_searching())? {
            TableSection::Suggestion => (row == 0).then(|| Cell {
                text: self.query.clone(),
                detail: Some(format!("Look up “{}”", self.query)),
                kind: CellKind::Suggestion,
            }),
            TableSection::Words(section) => {
                self.list_words(section).get(row).map(|word| Cell {
                    text: word.to_string(),
                    detail: None,
                    kind: section.into(),
                })
            }
        }
    }

    fn can_delete(&self, section: usize, row: usize) -> bool {
        self.resolve(TableLocation::new(section, row)).is_some()
    }

    fn delete_row(&mut self, section: usize, row: usize) -> Result<Option<String>, VocabError> {
        let Some((section, word)) = self.resolve(TableLocation::new(section, row)) else {
            return Ok(None);
        };
        self.delete_word(section, &word)?;
        Ok(Some(word))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::storage::JsonFileStorage;

    fn open_in(dir: &Path) -> Vocabulary {
        Vocabulary::open(JsonFileStorage::new(dir.join("vocabulary.json")))
    }

    fn with_notes(dir: &Path, entries: &[(&str, &str)]) -> Vocabulary {
        let mut vocab = open_in(dir);
        for (word, notes) in entries {
            vocab.set_word(word, notes).unwrap();
        }
        vocab
    }

    /// Storage that can be told to fail writes.
    struct FlakyStorage {
        fail: Arc<AtomicBool>,
    }

    impl Storage for FlakyStorage {
        fn load(&self) -> Result<Words, StorageError> {
            Err(StorageError::Missing("memory".into()))
        }

        fn load_default(&self) -> Result<Words, StorageError> {
            Ok(Words::default())
        }

        fn save(&self, _words: &Words) -> Result<(), StorageError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(StorageError::Io {
                    path: "memory".into(),
                    source: std::io::Error::other("disk full"),
                })
            } else {
                Ok(())
            }
        }

        fn fingerprint(&self) -> Option<Fingerprint> {
            None
        }
    }

    #[test]
    fn test_end_to_end_hello() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = open_in(dir.path());

        let location = vocab.set_word("Hello", "a greeting").unwrap();
        assert_eq!(location, Some(TableLocation::new(0, 0)));
        assert_eq!(vocab.words().notes.get("Hello").map(String::as_str), Some("a greeting"));
        assert!(vocab.words().history.is_empty());

        assert_eq!(vocab.get_notes("Hello"), "a greeting");
        assert_eq!(vocab.get_notes(" Hello "), "a greeting");
        assert_eq!(vocab.get_notes("hello "), "");
        assert_eq!(vocab.get_notes("hello"), "");
    }

    #[test]
    fn test_empty_word_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = open_in(dir.path());

        assert_eq!(vocab.set_word("   ", "notes").unwrap(), None);
        assert_eq!(vocab.del_dup_word("", "").unwrap(), None);
        assert!(vocab.words().is_empty());
        assert!(!dir.path().join("vocabulary.json").exists());
    }

    #[test]
    fn test_word_lives_in_one_section() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = open_in(dir.path());

        let steps = [
            ("cat", ""),
            ("cat", "a feline"),
            ("dog", "a canine"),
            ("cat", ""),
            ("dog", ""),
            ("dog", "again"),
            (" cat ", "spaced"),
        ];
        for (word, notes) in steps {
            vocab.set_word(word, notes).unwrap();
            vocab.del_dup_word(word, notes).unwrap();
            for w in ["cat", "dog"] {
                let count = Section::ALL
                    .iter()
                    .filter(|s| vocab.words().get(**s).contains_key(w))
                    .count();
                assert!(count <= 1, "{w} is in {count} sections");
            }
        }

        assert_eq!(vocab.words().section_of("cat"), Some(Section::Notes));
        assert_eq!(vocab.get_notes("cat"), "spaced");
        assert_eq!(vocab.get_notes("dog"), "again");
    }

    #[test]
    fn test_set_word_reports_new_rows_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("banana", "yellow"), ("cherry", "red")]);

        assert_eq!(
            vocab.set_word("Apple", "green").unwrap(),
            Some(TableLocation::new(0, 0))
        );
        assert_eq!(vocab.set_word("apple", "").unwrap(), Some(TableLocation::new(1, 0)));
        // Updating an existing entry inserts nothing
        assert_eq!(vocab.set_word("banana", "still yellow").unwrap(), None);
        assert_eq!(vocab.get_notes("banana"), "still yellow");
    }

    #[test]
    fn test_set_word_location_accounts_for_suggestion_section() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("apricot", "orange")]);
        vocab.set_query("ap");

        assert_eq!(
            vocab.set_word("apple", "green").unwrap(),
            Some(TableLocation::new(1, 0))
        );
        assert_eq!(vocab.set_word("apex", "").unwrap(), Some(TableLocation::new(2, 0)));
        // Hidden by the query, so there is no row to insert
        assert_eq!(vocab.set_word("zebra", "stripes").unwrap(), None);
        assert_eq!(vocab.get_notes("zebra"), "stripes");
    }

    #[test]
    fn test_del_dup_word_reports_prior_location() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = open_in(dir.path());
        vocab.set_word("alpha", "").unwrap();
        vocab.set_word("beta", "").unwrap();
        vocab.set_word("gamma", "").unwrap();

        // beta moves from history row 1 to notes
        assert_eq!(vocab.set_word("beta", "second").unwrap(), Some(TableLocation::new(0, 0)));
        assert_eq!(
            vocab.del_dup_word("beta", "second").unwrap(),
            Some(TableLocation::new(1, 1))
        );
        assert_eq!(vocab.list_words(Section::History), vec!["alpha", "gamma"]);

        // Reported once only
        assert_eq!(vocab.del_dup_word("beta", "second").unwrap(), None);
    }

    #[test]
    fn test_deletes_drop_pending_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = open_in(dir.path());
        for word in ["alpha", "beta", "gamma"] {
            vocab.set_word(word, "").unwrap();
        }

        vocab.set_word("beta", "second").unwrap();
        vocab.delete_word(Section::History, "alpha").unwrap();
        assert_eq!(vocab.del_dup_word("beta", "second").unwrap(), None);

        vocab.set_word("gamma", "third").unwrap();
        vocab.delete_multiple(&[TableLocation::new(0, 0)]).unwrap();
        assert_eq!(vocab.del_dup_word("gamma", "third").unwrap(), None);
        assert_eq!(vocab.list_words(Section::Notes), vec!["gamma"]);
    }

    #[test]
    fn test_del_dup_word_without_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = open_in(dir.path());
        vocab.set_word("fresh", "notes").unwrap();
        assert_eq!(vocab.del_dup_word("fresh", "notes").unwrap(), None);
        assert_eq!(vocab.get_notes("fresh"), "notes");
    }

    #[test]
    fn test_del_dup_word_removes_leftover_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.json");
        fs::write(&path, r#"[{"owl": "a bird"}, {"ant": ""}]"#).unwrap();
        let mut vocab = Vocabulary::open(JsonFileStorage::new(&path));

        // Called on its own, e.g. after notes were cleared elsewhere
        assert_eq!(
            vocab.del_dup_word("owl", "").unwrap(),
            Some(TableLocation::new(0, 0))
        );
        assert!(vocab.words().notes.is_empty());

        let reopened = Vocabulary::open(JsonFileStorage::new(&path));
        assert!(reopened.words().notes.is_empty());
    }

    #[test]
    fn test_list_words_sorts_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = open_in(dir.path());
        vocab.set_word("Zebra", "").unwrap();
        vocab.set_word("apple", "x").unwrap();
        vocab.set_word("Mango", "y").unwrap();
        vocab.set_word("banana", "z").unwrap();

        assert_eq!(vocab.list_words(Section::Notes), vec!["apple", "banana", "Mango"]);
        assert_eq!(vocab.list_words(Section::History), vec!["Zebra"]);
        assert_eq!(vocab.count_words(Section::Notes), 3);
    }

    #[test]
    fn test_prefix_filter() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("apple", "fruit"), ("banana", "an apple rival")]);

        vocab.set_query("  AP ");
        assert_eq!(vocab.query(), "AP");
        assert_eq!(vocab.list_words(Section::Notes), vec!["apple"]);

        vocab.set_query("");
        assert_eq!(vocab.list_words(Section::Notes), vec!["apple", "banana"]);
    }

    #[test]
    fn test_full_text_filter_matches_notes_body() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("cat", "a small ape-like joke")]);
        vocab.set_word("apex", "").unwrap();
        vocab.set_query("ape");

        assert_eq!(vocab.list_words(Section::Notes), Vec::<&str>::new());

        vocab.toggle_full_text(true);
        assert_eq!(vocab.list_words(Section::Notes), vec!["cat"]);
        assert_eq!(vocab.list_words(Section::History), vec!["apex"]);

        vocab.set_query("JOKE");
        assert_eq!(vocab.list_words(Section::Notes), vec!["cat"]);
        assert!(vocab.list_words(Section::History).is_empty());
    }

    #[test]
    fn test_delete_missing_word_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("kept", "yes")]);

        assert!(!vocab.delete_word(Section::Notes, "ghost").unwrap());
        assert!(!vocab.delete_word(Section::History, "kept").unwrap());
        assert!(vocab.delete_word(Section::Notes, "kept").unwrap());
        assert!(!vocab.delete_word(Section::Notes, "kept").unwrap());
    }

    #[test]
    fn test_delete_multiple_resolves_before_deleting() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(
            dir.path(),
            &[("cherry", "3"), ("apple", "1"), ("banana", "2")],
        );
        vocab.set_word("date", "").unwrap();

        let deleted = vocab
            .delete_multiple(&[TableLocation::new(0, 2), TableLocation::new(0, 0)])
            .unwrap();

        assert_eq!(deleted, vec!["cherry", "apple"]);
        assert_eq!(vocab.list_words(Section::Notes), vec!["banana"]);
        assert_eq!(vocab.list_words(Section::History), vec!["date"]);

        let reopened = open_in(dir.path());
        assert_eq!(reopened.words(), vocab.words());
    }

    #[test]
    fn test_delete_multiple_with_query_skips_suggestion() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("bat", "1"), ("bee", "2"), ("cow", "3")]);
        vocab.set_word("bear", "").unwrap();
        vocab.set_query("b");

        let deleted = vocab
            .delete_multiple(&[
                TableLocation::new(0, 0),
                TableLocation::new(2, 0),
                TableLocation::new(1, 1),
                TableLocation::new(1, 1),
                TableLocation::new(1, 9),
                TableLocation::new(5, 0),
            ])
            .unwrap();

        assert_eq!(deleted, vec!["bear", "bee"]);
        vocab.set_query("");
        assert_eq!(vocab.list_words(Section::Notes), vec!["bat", "cow"]);
        assert!(vocab.list_words(Section::History).is_empty());
    }

    #[test]
    fn test_random_word() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = open_in(dir.path());
        vocab.set_word("only-history", "").unwrap();
        assert!(matches!(vocab.random_word(), Err(VocabError::EmptyCollection)));

        vocab.set_word("one", "1").unwrap();
        vocab.set_word("two", "2").unwrap();
        for _ in 0..20 {
            let word = vocab.random_word().unwrap();
            assert!(word == "one" || word == "two");
        }
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("Hello", "a greeting"), ("ciao", "bye")]);
        vocab.set_word("seen", "").unwrap();

        let reopened = open_in(dir.path());
        assert_eq!(reopened.words(), vocab.words());
    }

    #[test]
    fn test_malformed_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vocabulary.json"), "not json").unwrap();
        fs::write(
            dir.path().join("default-vocabulary.json"),
            r#"[{"welcome": "start here"}, {}]"#,
        )
        .unwrap();

        let vocab = open_in(dir.path());
        assert_eq!(vocab.get_notes("welcome"), "start here");
    }

    #[test]
    fn test_missing_files_fall_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vocab = open_in(dir.path());
        assert!(vocab.words().is_empty());
    }

    #[test]
    fn test_save_leaves_malformed_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.json");
        let broken = r#"[{"precious": "years of notes"}, {},]"#;
        fs::write(&path, broken).unwrap();

        let mut vocab = open_in(dir.path());
        assert!(vocab.words().is_empty());
        assert!(!vocab.save().unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), broken);

        // A real change still goes through
        vocab.set_word("fresh", "").unwrap();
        assert_eq!(open_in(dir.path()).words().section_of("fresh"), Some(Section::History));
    }

    #[test]
    fn test_save_keeps_changes_made_elsewhere() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.json");
        let mut vocab = with_notes(dir.path(), &[("local", "mine")]);

        fs::write(&path, r#"[{"local": "mine", "synced": "from another device"}, {}]"#).unwrap();
        assert!(!vocab.save().unwrap());

        let reopened = open_in(dir.path());
        assert_eq!(reopened.get_notes("synced"), "from another device");
    }

    #[test]
    fn test_save_writes_default_dataset_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default-vocabulary.json"),
            r#"[{"welcome": "start here"}, {}]"#,
        )
        .unwrap();

        let mut vocab = open_in(dir.path());
        assert!(vocab.save().unwrap());
        assert!(!vocab.save().unwrap());
        assert_eq!(
            open_in(dir.path()).get_notes("welcome"),
            "start here"
        );
    }

    #[test]
    fn test_save_skips_file_created_elsewhere() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.json");
        let mut vocab = open_in(dir.path());

        fs::write(&path, r#"[{"synced": "from another device"}, {}]"#).unwrap();
        assert!(!vocab.save().unwrap());
        assert_eq!(open_in(dir.path()).get_notes("synced"), "from another device");
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let fail = Arc::new(AtomicBool::new(false));
        let mut vocab = Vocabulary::open(FlakyStorage { fail: fail.clone() });
        vocab.set_word("kept", "").unwrap();

        fail.store(true, Ordering::SeqCst);
        assert!(vocab.set_word("kept", "now with notes").is_err());
        assert!(vocab.delete_word(Section::History, "kept").is_err());
        assert!(vocab.delete_multiple(&[TableLocation::new(1, 0)]).is_err());

        assert_eq!(vocab.words().section_of("kept"), Some(Section::History));
        assert_eq!(vocab.get_notes("kept"), "");
    }

    #[test]
    fn test_reloads_when_file_changes_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.json");
        let mut vocab = with_notes(dir.path(), &[("local", "mine")]);

        fs::write(&path, r#"[{"local": "mine", "synced": "from another device"}, {}]"#).unwrap();
        vocab.set_word("new", "").unwrap();

        assert_eq!(vocab.get_notes("synced"), "from another device");
        let reopened = Vocabulary::open(JsonFileStorage::new(&path));
        assert_eq!(reopened.get_notes("synced"), "from another device");
        assert_eq!(reopened.words().section_of("new"), Some(Section::History));
    }

    #[test]
    fn test_import_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("old", "gone after import")]);

        let import_path = dir.path().join("import.json");
        fs::write(&import_path, r#"[{"imported": "yes"}, {"viewed": ""}]"#).unwrap();
        vocab.import(&import_path).unwrap();
        assert_eq!(vocab.get_notes("imported"), "yes");
        assert_eq!(vocab.get_notes("old"), "");

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{}").unwrap();
        assert!(vocab.import(&bad).is_err());
        assert_eq!(vocab.get_notes("imported"), "yes");

        let export_path = dir.path().join("export.json");
        vocab.export(&export_path).unwrap();
        assert_eq!(&storage::read_words(&export_path).unwrap(), vocab.words());
    }

    #[test]
    fn test_suggestion_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = open_in(dir.path());
        vocab.set_query("xyz");

        assert_eq!(vocab.number_of_sections(), 3);
        assert_eq!(vocab.number_of_rows(0), 1);
        assert!(!vocab.can_delete(0, 0));
        assert_eq!(vocab.title_for_header(0), "");
        assert_eq!(
            vocab.cell_for_row(0, 0),
            Some(Cell {
                text: "xyz".to_string(),
                detail: Some("Look up “xyz”".to_string()),
                kind: CellKind::Suggestion,
            })
        );
        assert_eq!(vocab.cell_for_row(0, 1), None);
        assert_eq!(vocab.delete_row(0, 0).unwrap(), None);
    }

    #[test]
    fn test_table_without_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("owl", "hoots")]);
        vocab.set_word("ant", "").unwrap();

        assert_eq!(vocab.number_of_sections(), 2);
        assert_eq!(vocab.title_for_header(0), "Words with notes");
        assert_eq!(vocab.title_for_header(1), "Words from history");
        assert_eq!(vocab.title_for_header(2), "");
        assert_eq!(vocab.number_of_rows(0), 1);
        assert_eq!(vocab.number_of_rows(1), 1);
        assert_eq!(vocab.number_of_rows(7), 0);
        assert_eq!(vocab.cell_for_row(1, 0).map(|c| c.kind), Some(CellKind::History));
        assert_eq!(vocab.cell_for_row(0, 0).map(|c| c.text), Some("owl".to_string()));
        assert!(vocab.can_delete(0, 0));
        assert!(!vocab.can_delete(0, 1));
    }

    #[test]
    fn test_delete_row_with_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = with_notes(dir.path(), &[("owl", "hoots"), ("ox", "strong")]);
        vocab.set_query("ox");

        assert_eq!(vocab.title_for_header(1), "Words with notes");
        assert_eq!(vocab.delete_row(1, 0).unwrap(), Some("ox".to_string()));
        assert_eq!(vocab.delete_row(1, 0).unwrap(), None);
        assert_eq!(vocab.get_notes("owl"), "hoots");
    }
}
