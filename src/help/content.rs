use super::{HelpBook, HelpFlag, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "MindVault",
        program: "mindvault",
        usage: "mindvault [note|bookmark] <command> [options]",
        topics: ALL_TOPICS,
        footer: &[
            "Use `mindvault help <topic>` for focused docs, e.g. `mindvault help list` or `mindvault help undo`.",
            "`mvault` is a shorter alias for the same binary.",
        ],
    }
}

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "note",
        summary: "Run a command against notes (the default collection).",
        usage: "mindvault note [list|add|view|edit|pin|fav|delete] ...",
        details: &[
            "Without a subcommand the notes are listed.",
            "Notes hold a title plus rich content: paragraphs with bold, italic, underline, colour and alignment, and embedded images.",
        ],
        flags: &[],
        aliases: &["notes"],
        section: Section::Command,
        examples: &["mindvault note", "mindvault note add \"Groceries\" milk and **eggs** -t home"],
    },
    HelpTopic {
        name: "bookmark",
        summary: "Run a command against bookmarks.",
        usage: "mindvault bookmark [list|add|view|edit|pin|fav|delete] ...",
        details: &["Without a subcommand the bookmarks are listed."],
        flags: &[],
        aliases: &["bookmarks", "bm"],
        section: Section::Command,
        examples: &["mindvault bookmark add https://www.rust-lang.org -t lang"],
    },
    HelpTopic {
        name: "list",
        summary: "List items, pinned first, newest change on top.",
        usage: "mindvault [note|bookmark] list [-s text] [-t tag] [--pinned|--unpinned|--favorites] [--absolute] [--all|-a]",
        details: &[
            "Search is case-insensitive and matches titles and note text, or bookmark titles, descriptions and URLs.",
            "When both groups are non-empty, pinned items get their own heading above the rest.",
            "Search and tag filters combine; an item must satisfy both.",
        ],
        flags: &[
            HelpFlag { name: "-s, --search <text>", desc: "Substring search, highlighted in the output." },
            HelpFlag { name: "-t, --tag <tag>", desc: "Only items carrying this tag (# is optional)." },
            HelpFlag { name: "--pinned / --unpinned", desc: "Limit to pinned or unpinned items." },
            HelpFlag { name: "--favorites, --fav", desc: "Only favorites." },
            HelpFlag { name: "--scope <name>", desc: "all|pinned|unpinned|favorites" },
            HelpFlag { name: "--absolute", desc: "Print dates instead of relative ages." },
            HelpFlag { name: "--all, -a", desc: "Skip the pager." },
        ],
        aliases: &["ls"],
        section: Section::Command,
        examples: &["mindvault list -s milk", "mindvault bookmark list -t docs --favorites"],
    },
    HelpTopic {
        name: "add",
        summary: "Create a note or bookmark.",
        usage: "mindvault note add <title> [body...] [-t tag] [-i image] [--align left|center|right]",
        details: &[
            "Note bodies are Markdown: **bold**, *italic* and <u>underline</u> carry over, and images are embedded as data URLs.",
            "Bookmarks take a URL first. When no --title is given, the title and a short description are fetched from the Gemini API.",
            "If the fetch fails or no API key is configured, the bookmark is saved as \"New Bookmark\" with a placeholder description.",
        ],
        flags: &[
            HelpFlag { name: "-t, --tag <tags>", desc: "Attach tags; comma-separate or repeat for more." },
            HelpFlag { name: "-i, --image <path>", desc: "Embed a png, jpeg, gif, webp or svg file (notes)." },
            HelpFlag { name: "--align <side>", desc: "Align every paragraph (notes)." },
            HelpFlag { name: "--title <text>", desc: "Bookmark title; skips the fetch." },
            HelpFlag { name: "--desc <text>", desc: "Bookmark description." },
            HelpFlag { name: "--no-fetch", desc: "Never contact the metadata service." },
        ],
        aliases: &["new"],
        section: Section::Command,
        examples: &[
            "mindvault note add Standup \"- ship *search*\" -t work",
            "mindvault bookmark add https://docs.rs --title \"docs.rs\"",
        ],
    },
    HelpTopic {
        name: "view",
        summary: "Show one item in full.",
        usage: "mindvault [note|bookmark] view <id> [--plain] [--html]",
        details: &["Notes print their header, a word count and the formatted content."],
        flags: &[
            HelpFlag { name: "--plain", desc: "No colour or styling." },
            HelpFlag { name: "--html", desc: "Print the stored HTML of a note." },
        ],
        aliases: &["show"],
        section: Section::Command,
        examples: &["mindvault note view k3x9q2m"],
    },
    HelpTopic {
        name: "edit",
        summary: "Change fields or tags of an item.",
        usage: "mindvault note edit <id> [--title T] [--body text] [-t tag] [--untag tag]",
        details: &[
            "Only the given fields change; the updated time moves forward even when edits land in the same millisecond.",
            "Bookmarks accept --url, --title and --desc.",
        ],
        flags: &[
            HelpFlag { name: "-t, --tag <tags>", desc: "Add tags (comma-separated)." },
            HelpFlag { name: "--untag <tags>", desc: "Remove tags (comma-separated)." },
        ],
        aliases: &[],
        section: Section::Command,
        examples: &["mindvault bookmark edit k3x9q2m --desc \"Crate docs\" --untag misc"],
    },
    HelpTopic {
        name: "pin",
        summary: "Toggle the pinned flag on one or more items.",
        usage: "mindvault [note|bookmark] pin <id>...",
        details: &["Pinned items sort above the rest and show a ^ marker."],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["mindvault pin k3x9q2m"],
    },
    HelpTopic {
        name: "fav",
        summary: "Toggle the favorite flag on one or more items.",
        usage: "mindvault [note|bookmark] fav <id>...",
        details: &["Favorites show a * marker and can be listed with --favorites."],
        flags: &[],
        aliases: &["favorite"],
        section: Section::Command,
        examples: &["mindvault bookmark fav k3x9q2m"],
    },
    HelpTopic {
        name: "delete",
        summary: "Delete items; inside the shell the delete can be undone.",
        usage: "mindvault [note|bookmark] delete <id>...",
        details: &[
            "Each delete raises a notification. In `mindvault shell` it offers `undo` until it times out.",
        ],
        flags: &[],
        aliases: &["rm"],
        section: Section::Command,
        examples: &["mindvault note delete k3x9q2m"],
    },
    HelpTopic {
        name: "tags",
        summary: "Show tag usage across notes and bookmarks.",
        usage: "mindvault tags [--names]",
        details: &["Tags are sorted by name with per-collection counts and the last time each was used."],
        flags: &[HelpFlag { name: "--names", desc: "Print bare tag names, one per line." }],
        aliases: &[],
        section: Section::Command,
        examples: &["mindvault tags"],
    },
    HelpTopic {
        name: "theme",
        summary: "Show or change the colour theme.",
        usage: "mindvault theme [light|dark|toggle]",
        details: &["The theme is stored in the vault and picks the colour palette for listings."],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["mindvault theme toggle"],
    },
    HelpTopic {
        name: "fetch",
        summary: "Look up a title and description for a URL without saving.",
        usage: "mindvault fetch <url>",
        details: &["Prints whether the result came from the service or the fallback."],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["mindvault fetch https://example.com"],
    },
    HelpTopic {
        name: "shell",
        summary: "Start an interactive session with undo and notifications.",
        usage: "mindvault shell",
        details: &[
            "Accepts every command without the program name, plus `undo [toast]`, `dismiss [toast]`, `toasts`, `view notes|bookmarks` and `quit`.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["mindvault shell"],
    },
    HelpTopic {
        name: "path",
        summary: "Print the vault directory.",
        usage: "mindvault path",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "help",
        summary: "Show this overview or a focused topic.",
        usage: "mindvault help [topic]",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["mindvault help add", "mindvault guide undo"],
    },
    HelpTopic {
        name: "undo",
        summary: "How deletes are kept around and restored.",
        usage: "mindvault guide undo",
        details: &[
            "Deleting inside `mindvault shell` raises a notification with a countdown (MINDVAULT_TOAST_MS, default 5000).",
            "`undo` restores the most recent undoable delete; `undo <toast>` picks a specific one.",
            "By default the item is put back at its old position without touching anything changed since. Set MINDVAULT_UNDO=snapshot to roll the whole collection back instead.",
            "One-shot deletes outside the shell are final.",
        ],
        flags: &[],
        aliases: &["toasts"],
        section: Section::Guide,
        examples: &["printf 'delete k3x9q2m\\nundo\\n' | mindvault shell"],
    },
    HelpTopic {
        name: "formatting",
        summary: "Rich text in notes.",
        usage: "mindvault guide formatting",
        details: &[
            "Note bodies accept Markdown for bold, italic and line breaks, and HTML spans for underline and colour.",
            "Images passed with --image are stored inline, so the vault file stays self-contained.",
            "`view --html` shows what is stored; search ignores markup.",
        ],
        flags: &[],
        aliases: &["rich-text"],
        section: Section::Guide,
        examples: &["mindvault note add Plan \"**bold** <span style=\\\"color: #ef4444\\\">red</span>\" --align center"],
    },
    HelpTopic {
        name: "tagging",
        summary: "Tag rules shared by notes and bookmarks.",
        usage: "mindvault guide tagging",
        details: &[
            "Tags are stored lowercase without the leading #, and duplicates collapse.",
            "Each tag gets a stable colour derived from its name.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Guide,
        examples: &["mindvault list -t todo"],
    },
    HelpTopic {
        name: "MINDVAULT_DIR",
        summary: "Vault directory (default ~/.mindvault).",
        usage: "MINDVAULT_DIR=/path mindvault ...",
        details: &["Created on demand. The data lives in mindvault_data_v2.json inside it."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["MINDVAULT_DIR=/tmp/vault mindvault list"],
    },
    HelpTopic {
        name: "MINDVAULT_API_KEY",
        summary: "Gemini API key for bookmark metadata (also GEMINI_API_KEY, API_KEY).",
        usage: "MINDVAULT_API_KEY=... mindvault bookmark add <url>",
        details: &["Without a key bookmarks fall back to placeholder metadata."],
        flags: &[],
        aliases: &["GEMINI_API_KEY", "API_KEY"],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "MINDVAULT_MODEL",
        summary: "Model used for metadata (default gemini-3-flash-preview).",
        usage: "MINDVAULT_MODEL=name mindvault fetch <url>",
        details: &["MINDVAULT_API_BASE overrides the service root URL."],
        flags: &[],
        aliases: &["MINDVAULT_API_BASE"],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "MINDVAULT_FETCH_TIMEOUT_MS",
        summary: "Metadata request timeout in milliseconds (default 10000).",
        usage: "MINDVAULT_FETCH_TIMEOUT_MS=3000 mindvault bookmark add <url>",
        details: &["MINDVAULT_NO_FETCH disables the request entirely."],
        flags: &[],
        aliases: &["MINDVAULT_NO_FETCH"],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "MINDVAULT_TOAST_MS",
        summary: "How long delete notifications stay undoable (default 5000).",
        usage: "MINDVAULT_TOAST_MS=10000 mindvault shell",
        details: &["MINDVAULT_UNDO=merge|snapshot chooses how undo restores items."],
        flags: &[],
        aliases: &["MINDVAULT_UNDO"],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "NO_COLOR",
        summary: "Disable coloured output.",
        usage: "NO_COLOR=1 mindvault list",
        details: &["Keeps output monochrome for piping."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "RUST_LOG",
        summary: "Log level written to stderr (default warn).",
        usage: "RUST_LOG=debug mindvault ...",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["RUST_LOG=mindvault=info mindvault bookmark add https://example.com"],
    },
];
