#![allow(clippy::unwrap_used)]

mod format;
