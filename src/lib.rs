// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

pub mod api;
pub mod config;
pub mod directory;
pub mod export;
pub mod models;
pub mod monthly;
pub mod returns;
pub mod sector;
pub mod web;
