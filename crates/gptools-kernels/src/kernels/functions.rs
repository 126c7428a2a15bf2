//! Unit tests for the kernel variants.
