use crate::Error;
use log::debug;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::fs::read_to_string;
use std::io::BufRead;
use std::iter::FromIterator;
use std::path::Path;

/// Words are stored and queried in lowercase.
fn normalize(word: &str) -> Cow<str> {
    if word.chars().any(char::is_uppercase) {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}

/// In-memory word store with exact membership and length-bucketed prefix queries.
///
/// Every word is kept once in a hash set, and once in a bucket with all words of the same
/// length (in `char`s). Buckets are sorted, so [`contains_prefix`](WordIndex::contains_prefix)
/// is a binary search.
/// Loading is additive: duplicates, within one load or between loads, are stored once.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    words: HashSet<String>,
    by_length: BTreeMap<usize, Vec<String>>,
    /// Path of the wordfile used to build the index.
    /// Empty if the index is not built from a file.
    pub wordfile: String,
}

impl fmt::Display for WordIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<WordIndex: {} words, {} lengths from '{}'>",
            self.len(),
            self.by_length.len(),
            self.wordfile
        )
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = WordIndex::new();
        index.load_words(iter);
        index
    }
}

impl<S: AsRef<str>> Extend<S> for WordIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.load_words(iter);
    }
}

impl WordIndex {
    /// Create a new empty index.
    pub fn new() -> WordIndex {
        WordIndex::default()
    }

    /// Build an index from a list of words.
    /// ## Example
    /// ```
    /// use gridfill::WordIndex;
    /// let index = WordIndex::from_words(&["aardvark", "Zebra", "zebra"]);
    /// assert_eq!(index.len(), 2);
    /// assert!(index.is_word_present("zebra"));
    /// ```
    pub fn from_words(words: &[&str]) -> WordIndex {
        words.iter().collect()
    }

    /// Read the index from a file. The file must be encoded in utf-8 and
    /// have one word per line.
    /// ## Errors
    /// Fails if the wordfile can not be read.
    pub fn from_file<P: AsRef<Path>>(wordfile: P) -> Result<WordIndex, Error> {
        let wordfile = wordfile.as_ref().display().to_string();
        let contents = read_to_string(&wordfile).map_err(|source| Error::ReadError {
            path: wordfile.clone(),
            source,
        })?;
        let mut index = WordIndex::new();
        index.load_words(contents.lines());
        index.wordfile = wordfile;
        Ok(index)
    }

    /// Add the words from `reader`, one word per line.
    /// Nothing is added if reading fails halfway.
    /// ## Errors
    /// If a line can not be read.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> Result<(), Error> {
        let lines = reader
            .lines()
            .collect::<Result<Vec<String>, _>>()
            .map_err(|source| Error::ReadError {
                path: String::new(),
                source,
            })?;
        self.load_words(lines);
        Ok(())
    }

    /// Add one word per line. Lines are trimmed and lowercased, blank lines are skipped,
    /// and words that are already present are ignored.
    pub fn load_words<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.len();
        let mut touched = BTreeSet::new();
        for line in lines {
            let word = line.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            let word = normalize(word);
            if self.words.contains(word.as_ref()) {
                continue;
            }
            let length = word.chars().count();
            self.by_length
                .entry(length)
                .or_default()
                .push(word.to_string());
            self.words.insert(word.into_owned());
            touched.insert(length);
        }
        self.sort_buckets(&touched);
        debug!(
            "Loaded {} new words, {} words in {} lengths",
            self.len() - before,
            self.len(),
            self.by_length.len()
        );
    }

    #[cfg(feature = "rayon")]
    fn sort_buckets(&mut self, lengths: &BTreeSet<usize>) {
        self.by_length
            .iter_mut()
            .filter(|(length, _)| lengths.contains(*length))
            .map(|(_, bucket)| bucket)
            .collect::<Vec<_>>()
            .into_par_iter()
            .for_each(|bucket| bucket.sort_unstable());
    }

    #[cfg(not(feature = "rayon"))]
    fn sort_buckets(&mut self, lengths: &BTreeSet<usize>) {
        self.by_length
            .iter_mut()
            .filter(|(length, _)| lengths.contains(*length))
            .for_each(|(_, bucket)| bucket.sort_unstable());
    }

    /// The number of words in the index
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over all words in an unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// The word lengths present in the index, in increasing order.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_length.keys().copied()
    }

    /// Returns true if `word` is in the index.
    pub fn is_word_present(&self, word: &str) -> bool {
        self.lookup(&normalize(word)).is_some()
    }

    /// All words with exactly `length` characters, sorted.
    /// Empty if there are none.
    pub fn by_length(&self, length: usize) -> &[String] {
        match self.by_length.get(&length) {
            Some(bucket) => bucket,
            None => &[],
        }
    }

    /// Returns true if the index has a word with exactly `length` characters that starts
    /// with `prefix`. A word equal to `prefix` counts.
    /// ## Example
    /// ```
    /// use gridfill::WordIndex;
    /// let index = WordIndex::from_words(&["bar", "bes", "belt"]);
    /// assert!(index.contains_prefix("be", 3));
    /// assert!(index.contains_prefix("bel", 4));
    /// assert!(index.contains_prefix("bar", 3));
    /// assert!(!index.contains_prefix("bel", 3));
    /// ```
    pub fn contains_prefix(&self, prefix: &str, length: usize) -> bool {
        self.has_prefix(&normalize(prefix), length)
    }

    /// A new index with only the words of `length` characters.
    pub fn length_filtered(&self, length: usize) -> WordIndex {
        self.by_length(length).iter().collect()
    }

    /// Get the stored word equal to `word`, without normalizing.
    pub(crate) fn lookup(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    /// [`contains_prefix`](Self::contains_prefix) without normalizing.
    pub(crate) fn has_prefix(&self, prefix: &str, length: usize) -> bool {
        let bucket = self.by_length(length);
        let i = bucket.partition_point(|word| word.as_str() < prefix);
        bucket.get(i).map_or(false, |word| word.starts_with(prefix))
    }
}
