// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

mod language;
mod diagnostics;
mod workbook;
mod comapeo;
mod translation;
mod project;
mod build_api;
mod bundle;
mod cli;
mod subcmd;

fn main() {
    cli::execute().unwrap_or_else(|err| {
        eprintln!("\x1B[31m{0}\x1B[0m", err);
        std::process::exit(1);
    });
}
