// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Observability and tracing utilities.
//!
//! Span helpers for the replay live in [`spans`]. Subscriber installation is
//! left to the binary.

pub(crate) mod spans;

// Note: All span functions are internal (pub(crate)) and not re-exported
