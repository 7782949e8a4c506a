// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::common::{self, emit_error, DriverOpts, EmitOpts};
use clap::Parser;
#[cfg(feature = "serde")]
use serde_derive::Serialize;

#[derive(Debug, Parser)]
#[command(alias("d"))]
pub struct Opts {
    #[command(flatten)]
    driver: DriverOpts,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    match common::detect_driver(&opts.driver) {
        Ok(d) => {
            let board = Board {
                name: d.board().name().to_string(),
                revision: d.revision(),
            };
            board.emit(&opts.emit);
            true
        }
        Err(e) => {
            emit_error(&opts.emit, &e);
            false
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize))]
struct Board {
    name: String,
    revision: Option<u32>,
}

impl Board {
    fn emit(&self, opts: &EmitOpts) {
        #[cfg(feature = "json")]
        if opts.json {
            match serde_json::to_string(self) {
                Ok(s) => println!("{s}"),
                Err(e) => emit_error(opts, &e.into()),
            }
            return;
        }
        match self.revision {
            Some(rev) => println!("{} revision {}", common::format_name(opts, &self.name), rev),
            None => println!("{}", common::format_name(opts, &self.name)),
        }
    }
}
