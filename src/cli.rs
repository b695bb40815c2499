// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("centavo")
        .about("Personal finance tracker: accounts, transactions, budgets, debts, and dashboards")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("checking")
                                .help("checking|savings|credit_card|cash|investment"),
                        )
                        .arg(Arg::new("currency").long("currency").default_value("USD"))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .help("Opening balance (the account's baseline)"),
                        )
                        .arg(Arg::new("credit-limit").long("credit-limit"))
                        .arg(
                            Arg::new("closing-day")
                                .long("closing-day")
                                .value_parser(value_parser!(u32).range(1..=31)),
                        )
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .value_parser(value_parser!(u32).range(1..=31)),
                        )
                        .arg(
                            Arg::new("exclude-from-total")
                                .long("exclude-from-total")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts")))
                .subcommand(
                    Command::new("set-balance")
                        .about("Manually edit a balance; the new value becomes the baseline")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove an account (kept for history)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income|expense|transfer"),
                        )
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .help("Destination account (transfers only)"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("debt").long("debt").help("Debt this payment goes toward"))
                        .arg(Arg::new("description").long("description").default_value(""))
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("pending")
                                .long("pending")
                                .action(ArgAction::SetTrue)
                                .help("Record without affecting balances"),
                        ),
                )
                .subcommand(
                    json_flags(Command::new("list").about("List transactions"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction; balances are recomputed for everything touched")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("to").long("to"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("debt").long("debt"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("confirm")
                        .about("Confirm a pending transaction")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(
                    Command::new("unconfirm")
                        .about("Mark a transaction pending again")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction (soft)")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("debt")
                .about("Track loans and credit-card installment plans")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("loan")
                                .help("loan|credit_card"),
                        )
                        .arg(Arg::new("total").long("total").required(true))
                        .arg(
                            Arg::new("remaining")
                                .long("remaining")
                                .help("Defaults to the total"),
                        )
                        .arg(Arg::new("monthly").long("monthly"))
                        .arg(Arg::new("start").long("start").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .value_parser(value_parser!(u32).range(1..=31)),
                        )
                        .arg(
                            Arg::new("installments")
                                .long("installments")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .help("Credit card the plan belongs to (credit_card debts)"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List debts")))
                .subcommand(
                    Command::new("plan")
                        .about("Set the monthly payment from equal installments")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("replan")
                        .about("Set the monthly payment from the remaining amount and end date")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a debt (kept for history)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("threshold")
                                .long("threshold")
                                .value_parser(value_parser!(u32).range(1..=100))
                                .help("Warning threshold percentage (default 80)"),
                        ),
                )
                .subcommand(Command::new("list").arg(Arg::new("month").long("month")))
                .subcommand(
                    json_flags(Command::new("progress").about("Budgets with live spent amounts"))
                        .arg(Arg::new("month").long("month").help("Defaults to the current month")),
                ),
        )
        .subcommand(
            Command::new("fixed")
                .about("Recurring fixed expenses for the commitment calendar")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .required(true)
                                .value_parser(value_parser!(u32).range(1..=31)),
                        )
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("statement")
                .about("Credit-card statement reconciliation")
                .subcommand(
                    Command::new("reconcile")
                        .about("Recompute the statement balance for the open billing cycle")
                        .arg(Arg::new("account").required(true)),
                )
                .subcommand(
                    json_flags(Command::new("show").about("Statement, credit, and utilization figures"))
                        .arg(Arg::new("account").required(true)),
                ),
        )
        .subcommand(
            json_flags(Command::new("dashboard").about("Monthly overview and commitment calendar"))
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to the current month")),
        )
}
