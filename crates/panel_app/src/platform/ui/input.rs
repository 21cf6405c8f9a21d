use panel_core::Msg;

pub const HELP_TEXT: &str = "\
Commands:
  select <tag> <index>   show a row of a category (tags: stale, launches, name-disc, unauthorized)
  product <index>        show a product in the overview
  alert <tag>            email the user of the selected row
  bulk <tag>             email every user of a category (click twice to confirm)
  help                   show this text
  quit                   leave";

/// What the operator asked for on one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostInput {
    Panel(Msg),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> HostInput {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => HostInput::Panel(Msg::NoOp),
        ["help" | "?"] => HostInput::Help,
        ["quit" | "exit" | "q"] => HostInput::Quit,
        ["select", tag, index] => match index.parse() {
            Ok(index) => HostInput::Panel(Msg::RowSelected {
                tag: tag.to_string(),
                index,
            }),
            Err(_) => HostInput::Invalid(format!("not a row index: {index}")),
        },
        ["product", index] => match index.parse() {
            Ok(index) => HostInput::Panel(Msg::ProductSelected { index }),
            Err(_) => HostInput::Invalid(format!("not a row index: {index}")),
        },
        ["alert", tag] => HostInput::Panel(Msg::AlertClicked {
            tag: tag.to_string(),
        }),
        ["bulk", tag] => HostInput::Panel(Msg::BulkSendClicked {
            tag: tag.to_string(),
        }),
        _ => HostInput::Invalid(format!("unknown command: {}", line.trim())),
    }
}
