//! End-to-end checks of the wildsift pipeline over fixture files on disk.

#[cfg(test)]
mod classify;
#[cfg(test)]
mod fixtures;
