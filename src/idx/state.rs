//! One-shot header validation state shared by both decoders.

/// Whether a decoder has parsed its header yet.
///
/// The only transition is `Unvalidated -> Validated`; a decoder never goes
/// back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum HeaderState<H> {
    #[default]
    Unvalidated,
    Validated(H),
}

impl<H> HeaderState<H> {
    pub(crate) fn is_validated(&self) -> bool {
        matches!(self, HeaderState::Validated(_))
    }

    /// Returns the parsed header.
    ///
    /// # Panics
    /// Panics if the header has not been validated. Indexed access before
    /// validation is a caller bug, not bad input.
    #[track_caller]
    pub(crate) fn get(&self) -> &H {
        match self {
            HeaderState::Validated(header) => header,
            HeaderState::Unvalidated => panic!("Need to call validate_header() first"),
        }
    }
}
