pub fn execute() -> String {
    [
        "📖 Commands",
        "",
        "  list | ls                                   Refresh and show all transactions",
        "  search <text...> | s                        Show transactions matching the text",
        "  new <income|outcome> <price> <category> <description...> | add",
        "                                              Record a transaction (e.g. `new outcome 19,90 Food Lunch`)",
        "  summary | sum                               Show income, outcome and total",
        "  help | ?                                    Show this help message",
        "  quit | exit | q                             Leave",
    ]
    .join("\n")
}
