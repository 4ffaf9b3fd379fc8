use crate::app::page::{DirectoryPage, PanelSection};
use crate::core::{ConsultationMode, Navigator, SortKey};

pub const HELP: &str = "\
Commands:
  search <text>                    type into the search box (shows suggestions)
  submit                           commit the search box to the address
  pick <n>                         choose suggestion n (1-based)
  specialty <name>                 toggle a specialty filter
  consult video|clinic             toggle the consultation mode
  sort fees|experience             toggle the sort order
  clear                            drop consultation, specialty and sort filters
  back | forward                   move through the address history
  panel specialty|consultation|sort  collapse or expand a filter section
  url                              print the current address
  show                             render the page
  help                             print this help
  quit                             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Submit,
    Pick(usize),
    Specialty(String),
    Consult(ConsultationMode),
    Sort(SortKey),
    Clear,
    Back,
    Forward,
    Panel(PanelSection),
    Url,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_ascii_lowercase().as_str(), rest) {
            ("search", text) => Command::Search(text.to_string()),
            ("submit", "") => Command::Submit,
            ("pick", n) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Pick(n - 1),
                _ => return Err(format!("'{}' is not a suggestion number", n)),
            },
            ("specialty", name) if !name.is_empty() => Command::Specialty(name.to_string()),
            ("consult", mode) => match mode.to_ascii_lowercase().as_str() {
                "video" => Command::Consult(ConsultationMode::VideoConsult),
                "clinic" => Command::Consult(ConsultationMode::InClinic),
                _ => return Err(format!("unknown consultation mode '{}'", mode)),
            },
            ("sort", key) => match SortKey::from_query_value(&key.to_ascii_lowercase()) {
                Some(key) => Command::Sort(key),
                None => return Err(format!("unknown sort '{}'", key)),
            },
            ("panel", section) => match section.to_ascii_lowercase().as_str() {
                "specialty" => Command::Panel(PanelSection::Specialty),
                "consultation" => Command::Panel(PanelSection::Consultation),
                "sort" => Command::Panel(PanelSection::Sort),
                _ => return Err(format!("unknown panel section '{}'", section)),
            },
            ("clear", "") => Command::Clear,
            ("back", "") => Command::Back,
            ("forward", "") => Command::Forward,
            ("url", "") => Command::Url,
            ("show", "") => Command::Show,
            ("help", "") => Command::Help,
            ("quit" | "exit", "") => Command::Quit,
            _ => return Err(format!("unrecognized command '{}', try 'help'", line)),
        };

        Ok(command)
    }

    /// Applies a page interaction. Returns a message when the command had no effect.
    pub fn apply<N: Navigator>(&self, page: &mut DirectoryPage<N>) -> Option<String> {
        match self {
            Command::Search(text) => page.edit_search(text),
            Command::Submit => page.submit_search(),
            Command::Pick(index) => {
                if !page.select_suggestion(*index) {
                    return Some(format!("No suggestion #{}", index + 1));
                }
            }
            Command::Specialty(name) => page.toggle_specialty(name),
            Command::Consult(mode) => page.toggle_consultation(*mode),
            Command::Sort(key) => page.toggle_sort(*key),
            Command::Clear => page.clear_filters(),
            Command::Back => {
                if !page.back() {
                    return Some("Already at the oldest entry".to_string());
                }
            }
            Command::Forward => {
                if !page.forward() {
                    return Some("Already at the newest entry".to_string());
                }
            }
            Command::Panel(section) => page.toggle_section(*section),
            Command::Url | Command::Show | Command::Help | Command::Quit => {}
        }
        None
    }
}
