//! Unit tests for the floor-plan document format.
