use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Everything from a table opener up to the nearest closer, across lines.
regex!(TABLE_REGEX, r"\{\|[\s\S]+?\|\}");
regex!(UNORDERED_ITEM_REGEX, r"(?m)^\* (.*)");
regex!(ORDERED_ITEM_REGEX, r"(?m)^# (.*)");
regex!(HEADING_REGEX, r"={1,6}\s*(.+?)\s*={1,6}");
regex!(BOLD_REGEX, r"'''(.*?)'''");
regex!(ITALIC_REGEX, r"''(.*?)''");
regex!(PIPED_LINK_REGEX, r"\[\[([^|\]]+)\|([^\]]+)\]\]");
regex!(BARE_LINK_REGEX, r"\[\[([^\]]+)\]\]");
regex!(QUOTE_REGEX, r"(?m)^:(.*)");
regex!(CODE_REGEX, r"<code>(.*?)</code>");
regex!(FILE_REGEX, r"\[\[File:([^|\]]+)\|([^\]]+)\]\]");
