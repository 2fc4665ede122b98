//! End-to-end tests live under `tests/`; this crate exports nothing.
