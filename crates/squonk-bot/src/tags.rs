//! Embedded tag reading for uploaded audio

use std::io::Cursor;

use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("Failed to detect audio format: {0}")]
    Probe(#[from] std::io::Error),

    #[error("Failed to read audio file: {0}")]
    Read(#[from] lofty::error::LoftyError),
}

/// Title and artist as found in the file, before any defaulting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl TrackTags {
    /// Take the first title and artist values of `tag`
    pub fn from_tag(tag: Option<&Tag>) -> Self {
        match tag {
            Some(tag) => Self {
                title: tag.title().map(|t| t.into_owned()),
                artist: tag.artist().map(|a| a.into_owned()),
            },
            None => Self::default(),
        }
    }
}

/// Parse the tags of an in-memory audio file.
///
/// The format is guessed from the content. A file whose format is
/// recognized but carries no tag at all yields empty [`TrackTags`]; an
/// unrecognized or corrupt file is an error.
pub fn read_tags(bytes: &[u8]) -> Result<TrackTags, TagError> {
    let tagged = Probe::new(Cursor::new(bytes)).guess_file_type()?.read()?;

    let tag = tagged.primary_tag().or_else(|| tagged.first_tag());
    debug!(
        "Read {:?} file, tag type {:?}",
        tagged.file_type(),
        tag.map(|t| t.tag_type())
    );

    Ok(TrackTags::from_tag(tag))
}
