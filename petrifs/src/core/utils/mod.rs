// SPDX-License-Identifier: MIT

pub mod path_utils;
pub mod time_utils;
