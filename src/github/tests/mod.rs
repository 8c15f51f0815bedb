//! Unit tests for pull request and repository addressing.
