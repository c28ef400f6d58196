// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod export;
pub mod forms;
pub mod interaction;
pub mod menu;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;
