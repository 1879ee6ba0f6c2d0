// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use tradescan::bootstrap::{init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so JSON output on stdout stays clean
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!("Replay failed: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
