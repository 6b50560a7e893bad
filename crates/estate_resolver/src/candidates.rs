//! Candidate path generation.
//!
//! Uploads across the product's history wrote files under several prefix
//! conventions: flat by property, nested owner/property, nested owner/date,
//! and flat by filename. Rather than probing the bucket once per convention,
//! every plausible reconstruction is generated up front in priority order.

use crate::RawReference;
use std::collections::HashSet;

/// Ordered, duplicate-free set of bucket-relative paths for one reference.
///
/// Most specific first: the stored path itself always leads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePaths {
    paths: Vec<String>,
    seen: HashSet<String>,
}

impl CandidatePaths {
    /// Generate candidates for a classified reference.
    ///
    /// # Arguments
    ///
    /// * `reference` - Classified raw reference
    /// * `property_id` - Owning property, used as a folder-name heuristic
    /// * `owner_id` - Uploader, used as a secondary heuristic when present
    ///
    /// URLs outside the bucket and empty references produce no candidates.
    pub fn generate(reference: &RawReference, property_id: &str, owner_id: Option<&str>) -> Self {
        match reference {
            RawReference::Empty | RawReference::ExternalUrl(_) => Self::default(),
            RawReference::AbsoluteUrl { path, .. }
            | RawReference::BucketRelative(path)
            | RawReference::BareFilename(path) => Self::from_path(path, property_id, owner_id),
        }
    }

    /// Generate candidates for an already-normalized path.
    pub fn from_path(path: &str, property_id: &str, owner_id: Option<&str>) -> Self {
        let mut candidates = Self::default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((&basename, folders)) = segments.split_last() else {
            return candidates;
        };
        let parent = folders.last().copied();
        let property = Some(property_id.trim()).filter(|p| !p.is_empty());
        let owner = owner_id.map(str::trim).filter(|o| !o.is_empty());

        candidates.push(join(&segments));
        if segments.len() > 1 {
            candidates.push(join(&segments[1..]));
        }
        if segments.len() > 2 {
            candidates.push(join(&segments[2..]));
        }
        candidates.push(basename.to_string());

        if let Some(property) = property {
            candidates.push(join(&[property, basename]));
            if let Some(parent) = parent {
                candidates.push(join(&[property, parent, basename]));
            }
        }

        if let Some(owner) = owner {
            candidates.push(join(&[owner, basename]));
            if let Some(property) = property {
                candidates.push(join(&[owner, property, basename]));
            }
            if let Some(parent) = parent {
                candidates.push(join(&[owner, parent, basename]));
            }
        }

        candidates
    }

    fn push(&mut self, candidate: String) {
        if !candidate.is_empty() && self.seen.insert(candidate.clone()) {
            self.paths.push(candidate);
        }
    }

    /// Highest-priority candidate.
    pub fn first(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }

    /// Candidates in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no candidate was produced.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Consume into the ordered list.
    pub fn into_vec(self) -> Vec<String> {
        self.paths
    }
}

fn join(segments: &[&str]) -> String {
    segments.join("/")
}
