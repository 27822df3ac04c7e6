//! Errors the hierarchy navigator can raise. Most "can't do that right
//! now" situations aren't errors at all (spec §4.13: wrong selection
//! returns silently) -- those are modeled as `Outcome::Cancel`, leaving
//! this enum for genuinely exceptional conditions.

#[derive(Debug, thiserror::Error)]
pub enum HierError {
    #[error("cannot ascend: already at the root of the hierarchy")]
    AtRoot,
}
