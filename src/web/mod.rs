// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

pub mod routes;
pub mod server;
pub mod state;

// Export commonly used items
pub use state::AppState;
