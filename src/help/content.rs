use super::{HelpBook, HelpFlag};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "Stamp Notes",
        usage: "note [flags] [name or pattern...]",
        summary: &[
            "Without flags, the words given are joined into a note name: today's note of that name is opened in your editor, created first when missing (`note daily standup` opens daily_standup-<YYYYMMDD>.md).",
            "A name ending in .md opens that exact file, archived or not.",
        ],
        flags: FLAGS,
        environment: ENVIRONMENT,
        examples: &[
            "note -l 2021",
            "note -al 'meeting*'",
            "note -s standup",
            "note -as 'release plan'",
            "note -d 'temp*'",
        ],
        footer: &[
            "Patterns are shell globs (* ? [..]) or plain substrings, matched without regard to case.",
            "Flags can be grouped (-al); -s and -d take the next argument and must end their group.",
        ],
    }
}

const FLAGS: &[HelpFlag<'static>] = &[
    HelpFlag { name: "-l [pattern]", desc: "List notes, optionally filtered by pattern." },
    HelpFlag { name: "-a", desc: "Include archived notes when listing or searching." },
    HelpFlag {
        name: "-s <term>",
        desc: "Search note contents; shows up to 3 matching lines per note.",
    },
    HelpFlag { name: "-d <pattern>", desc: "Move matching notes into the archive." },
    HelpFlag { name: "-h, --help", desc: "Show this message." },
    HelpFlag { name: "--config", desc: "Choose the editor and notes directory." },
    HelpFlag {
        name: "--autocomplete [shell]",
        desc: "Print a completion script for bash, zsh or fish.",
    },
    HelpFlag { name: "--alias [name]", desc: "Print shell aliases (default name: n)." },
];

const ENVIRONMENT: &[HelpFlag<'static>] = &[
    HelpFlag { name: "STAMP_NOTES_DIR", desc: "Override the notes directory." },
    HelpFlag { name: "STAMP_NOTES_CONFIG", desc: "Use another config file." },
    HelpFlag { name: "VISUAL, EDITOR", desc: "Default editor when none is configured." },
    HelpFlag { name: "NO_COLOR", desc: "Disable search highlighting." },
    HelpFlag { name: "STAMP_NOTES_LOG", desc: "Log filter for diagnostics, e.g. debug." },
];
