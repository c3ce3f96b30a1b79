//! Directory-backed loading and persistence for storylets.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use skein_codec::{decode_storylet, encode_storylet, DecodeError};
use skein_core::{validate_storylet, Effect, Prerequisite, Storylet};
use strsim::jaro_winkler;

use crate::error::{StoreError, StoreResult};
use crate::report::{byte_offset, LoadIssue};

/// File extensions recognized as storylet records.
const RECORD_EXTENSIONS: [&str; 2] = ["jsonc", "json"];

/// Minimum Jaro-Winkler similarity for a fuzzy id suggestion.
const SUGGEST_THRESHOLD: f64 = 0.6;

/// What [`StoryletStore::open`] produced: the store plus per-file issues.
#[derive(Debug)]
pub struct LoadResult {
    /// The opened store, holding every record that survived loading.
    pub store: StoryletStore,
    /// Problems found along the way, in path order.
    pub issues: Vec<LoadIssue>,
}

/// A directory of storylet records, loaded into memory.
///
/// Each record lives in its own `.jsonc` (or `.json`) file named after the
/// storylet id. Loading never fails on a bad record: the record is skipped
/// and reported as a [`LoadIssue`], and the rest of the directory loads.
#[derive(Debug)]
pub struct StoryletStore {
    dir: PathBuf,
    storylets: Vec<Storylet>,
    index: HashMap<String, usize>,
}

impl StoryletStore {
    /// Load every record in `dir`, creating the directory if needed.
    ///
    /// Files load in path order. Records that fail to parse or validate,
    /// and records whose id was already taken by an earlier file, are
    /// skipped and reported. Prerequisites that name a storylet which is
    /// neither defined nor unlocked anywhere are reported as warnings.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<LoadResult> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| RECORD_EXTENSIONS.iter().any(|known| ext == *known))
            })
            .collect();
        paths.sort();

        let mut issues = Vec::new();
        let mut loaded: Vec<(PathBuf, String, Storylet)> = Vec::new();

        for path in paths {
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(error) => {
                    issues.push(LoadIssue::error(
                        &path,
                        0..0,
                        format!("cannot read file: {error}"),
                    ));
                    continue;
                }
            };

            let storylet = match decode_storylet(&source) {
                Ok(storylet) => storylet,
                Err(error) => {
                    let span = decode_span(&source, &error);
                    issues
                        .push(LoadIssue::error(&path, span, error.to_string()).with_source(source));
                    continue;
                }
            };

            let report = validate_storylet(&storylet);
            if !report.is_valid() {
                issues.push(
                    LoadIssue::error(&path, 0..0, format!("invalid storylet: {report}"))
                        .with_source(source),
                );
                continue;
            }

            if loaded.iter().any(|(_, _, seen)| seen.id == storylet.id) {
                issues.push(
                    LoadIssue::error(
                        &path,
                        0..0,
                        format!(
                            "duplicate storylet id '{}', keeping the first definition",
                            storylet.id
                        ),
                    )
                    .with_source(source),
                );
                continue;
            }

            loaded.push((path, source, storylet));
        }

        issues.extend(dangling_link_warnings(&loaded));

        let mut store = Self {
            dir,
            storylets: Vec::new(),
            index: HashMap::new(),
        };
        for (_, _, storylet) in loaded {
            store.insert(storylet);
        }

        Ok(LoadResult { store, issues })
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look up a storylet by id.
    pub fn get(&self, id: &str) -> Option<&Storylet> {
        self.index
            .get(id)
            .map(|&position| &self.storylets[position])
    }

    /// Every storylet, in load order.
    pub fn all(&self) -> &[Storylet] {
        &self.storylets
    }

    /// Number of storylets in the store.
    pub fn len(&self) -> usize {
        self.storylets.len()
    }

    /// Whether the store holds no storylets.
    pub fn is_empty(&self) -> bool {
        self.storylets.is_empty()
    }

    /// Storylets whose category equals `category`.
    pub fn by_category(&self, category: &str) -> Vec<&Storylet> {
        self.storylets
            .iter()
            .filter(|storylet| storylet.category == category)
            .collect()
    }

    /// Storylets carrying exactly the tag `tag`.
    pub fn with_tag(&self, tag: &str) -> Vec<&Storylet> {
        self.storylets
            .iter()
            .filter(|storylet| storylet.tags.iter().any(|candidate| candidate == tag))
            .collect()
    }

    /// Suggest storylet ids similar to `input`, best match first.
    ///
    /// Prefix matches rank above substring matches, which rank above fuzzy
    /// matches scored by Jaro-Winkler similarity.
    pub fn suggest(&self, input: &str, limit: usize) -> Vec<&str> {
        let input_lower = input.to_lowercase();
        let mut scored: Vec<(&str, f64)> = self
            .storylets
            .iter()
            .filter_map(|storylet| {
                let id = storylet.id.as_str();
                let id_lower = id.to_lowercase();
                if id_lower.starts_with(&input_lower) {
                    Some((id, 2.0))
                } else if id_lower.contains(&input_lower) {
                    Some((id, 1.0))
                } else {
                    let score = jaro_winkler(&input_lower, &id_lower);
                    (score >= SUGGEST_THRESHOLD).then_some((id, score))
                }
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(limit).map(|(id, _)| id).collect()
    }

    /// Validate and write a storylet to the directory, updating the store.
    ///
    /// Invalid storylets are refused without touching the filesystem.
    /// Returns the path the record was written to.
    pub fn save(&mut self, storylet: Storylet) -> StoreResult<PathBuf> {
        let report = validate_storylet(&storylet);
        if !report.is_valid() {
            return Err(StoreError::InvalidStorylet {
                id: storylet.id,
                report,
            });
        }

        let path = self.dir.join(format!("{}.jsonc", storylet.id));
        fs::write(&path, format!("{}\n", encode_storylet(&storylet)))?;

        match self.index.get(&storylet.id) {
            Some(&position) => self.storylets[position] = storylet,
            None => self.insert(storylet),
        }
        Ok(path)
    }

    /// Remove a storylet from the store and delete its record on disk.
    ///
    /// Records are stored as `{id}.jsonc` by convention, with `{id}.json`
    /// accepted as a fallback. Returns whether the storylet existed.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let Some(position) = self.index.remove(id) else {
            return Ok(false);
        };
        self.storylets.remove(position);
        self.reindex();

        for extension in RECORD_EXTENSIONS {
            let path = self.dir.join(format!("{id}.{extension}"));
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(true)
    }

    /// Drop the in-memory records and load the directory again.
    pub fn reload(&mut self) -> StoreResult<Vec<LoadIssue>> {
        let LoadResult { store, issues } = Self::open(self.dir.clone())?;
        *self = store;
        Ok(issues)
    }

    fn insert(&mut self, storylet: Storylet) {
        self.index.insert(storylet.id.clone(), self.storylets.len());
        self.storylets.push(storylet);
    }

    fn reindex(&mut self) {
        self.index = self
            .storylets
            .iter()
            .enumerate()
            .map(|(position, storylet)| (storylet.id.clone(), position))
            .collect();
    }
}

/// Best-effort byte range for a decode failure.
///
/// Parser positions refer to the comment-stripped source, which keeps the
/// byte offsets of the original text, so the range lands on the right spot
/// in the file as written.
fn decode_span(source: &str, error: &DecodeError) -> Range<usize> {
    match error {
        DecodeError::Json(error) if error.line() > 0 => {
            let offset = byte_offset(source, error.line(), error.column());
            offset..source.len().min(offset + 1)
        }
        _ => 0..0,
    }
}

/// Warn about `StoryletPlayed` prerequisites naming a storylet that is
/// neither defined in the directory nor unlocked by any effect.
///
/// These are authoring mistakes nine times out of ten: the requirement can
/// never be met, so the storylet can never surface. Requirements that a
/// storylet must NOT have been played are left alone.
fn dangling_link_warnings(loaded: &[(PathBuf, String, Storylet)]) -> Vec<LoadIssue> {
    let mut reachable: BTreeSet<&str> = loaded
        .iter()
        .map(|(_, _, storylet)| storylet.id.as_str())
        .collect();
    for (_, _, storylet) in loaded {
        collect_unlocked(&storylet.effects, &mut reachable);
        for option in &storylet.options {
            collect_unlocked(&option.effects, &mut reachable);
        }
    }

    let mut warnings = Vec::new();
    for (path, source, storylet) in loaded {
        let mut required = BTreeSet::new();
        collect_required(&storylet.prerequisites, &mut required);
        for option in &storylet.options {
            collect_required(&option.prerequisites, &mut required);
        }
        for id in required {
            if !reachable.contains(id) {
                warnings.push(
                    LoadIssue::warning(
                        path,
                        0..0,
                        format!(
                            "'{}' requires storylet '{id}', which is never defined or unlocked",
                            storylet.id
                        ),
                    )
                    .with_source(source.clone()),
                );
            }
        }
    }
    warnings
}

fn collect_unlocked<'a>(effects: &'a [Effect], out: &mut BTreeSet<&'a str>) {
    for effect in effects {
        match effect {
            Effect::UnlockStorylet { storylet_id } => {
                out.insert(storylet_id.as_str());
            }
            Effect::Compound { children } => collect_unlocked(children, out),
            _ => {}
        }
    }
}

fn collect_required<'a>(prerequisites: &'a [Prerequisite], out: &mut BTreeSet<&'a str>) {
    for prerequisite in prerequisites {
        match prerequisite {
            Prerequisite::StoryletPlayed {
                storylet_id,
                must_have_played: true,
            } => {
                out.insert(storylet_id.as_str());
            }
            Prerequisite::Compound { children, .. } => collect_required(children, out),
            _ => {}
        }
    }
}
