// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn date_range(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .requires("to")
            .help("First day, YYYY-MM-DD"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .requires("from")
            .help("Last day, YYYY-MM-DD"),
    )
}

pub fn build_cli() -> Command {
    Command::new("pdv")
        .version(crate_version!())
        .about("Point-of-sale: products, stock, sales and cash history")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("login")
                .about("Sign in; the first login with an email creates the business profile")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true))
                .arg(
                    Arg::new("business")
                        .long("business")
                        .help("Business name, required on first login"),
                ),
        )
        .subcommand(Command::new("logout").about("Forget the logged-in user"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("product")
                .about("Register, view, edit and delete products")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("buy")
                                .long("buy")
                                .default_value("0")
                                .help("Buy price as typed digits, cents first (1234 = R$ 12,34)"),
                        )
                        .arg(
                            Arg::new("sell")
                                .long("sell")
                                .default_value("0")
                                .help("Sell price as typed digits, cents first"),
                        )
                        .arg(Arg::new("qty").long("qty").required(true))
                        .arg(Arg::new("location").long("location"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("expiry")
                                .long("expiry")
                                .required(true)
                                .help("Expiry date, YYYY-MM-DD"),
                        )
                        .arg(Arg::new("image").long("image")),
                )
                .subcommand(Command::new("show").arg(Arg::new("id").required(true)))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("buy").long("buy"))
                        .arg(Arg::new("sell").long("sell"))
                        .arg(Arg::new("qty").long("qty"))
                        .arg(Arg::new("location").long("location")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("categories").about("List product categories")),
        )
        .subcommand(
            Command::new("stock").about("Browse stock").subcommand(json_flags(
                Command::new("list")
                    .arg(Arg::new("search").long("search"))
                    .arg(Arg::new("category").long("category"))
                    .arg(
                        Arg::new("expiring")
                            .long("expiring")
                            .action(ArgAction::SetTrue)
                            .help("Only products expiring this month"),
                    ),
            )),
        )
        .subcommand(
            Command::new("sale")
                .about("Register a sale")
                .subcommand(
                    Command::new("checkout")
                        .arg(
                            Arg::new("add")
                                .long("add")
                                .action(ArgAction::Append)
                                .required(true)
                                .help("Product id, or ID:N to add it N times"),
                        )
                        .arg(
                            Arg::new("payment")
                                .long("payment")
                                .help("cash | debit_card | credit_card | pix"),
                        ),
                )
                .subcommand(Command::new("shell").about("Interactive cart")),
        )
        .subcommand(
            Command::new("cash")
                .about("Sales history")
                .subcommand(json_flags(date_range(Command::new("list"))))
                .subcommand(json_flags(date_range(Command::new("summary")))),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("sales")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv | json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stock, sales and journal consistency"))
}
