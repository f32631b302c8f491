/// Null operation name.
pub(super) const NULL_DISPLAY_NAME: &str = "Null";
