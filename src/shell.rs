//! Shell integration snippets. They are printed for the user to source;
//! shell rc files are never edited.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl Shell {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bash" => Some(Shell::Bash),
            "zsh" => Some(Shell::Zsh),
            "fish" => Some(Shell::Fish),
            _ => None,
        }
    }

    /// Pick the shell from an explicit argument, else `$SHELL`, else bash.
    pub fn detect(requested: Option<&str>, shell_env: Option<&str>) -> Result<Self> {
        if let Some(name) = requested {
            return Self::from_name(name).ok_or_else(|| {
                Error::usage(format!(
                    "Unsupported shell: {name} (expected bash, zsh or fish)"
                ))
            });
        }
        Ok(shell_env
            .and_then(|path| path.rsplit('/').next())
            .and_then(Self::from_name)
            .unwrap_or(Shell::Bash))
    }
}

/// Completion of note names, fetched from `<bin> -l` at completion time.
pub fn completion_script(shell: Shell, bin: &str) -> String {
    match shell {
        Shell::Bash => format!(
            "\
_{bin}_complete() {{
    local cur=\"${{COMP_WORDS[COMP_CWORD]}}\"
    COMPREPLY=( $(compgen -W \"$({bin} -l 2>/dev/null)\" -- \"$cur\") )
}}
complete -F _{bin}_complete {bin}
"
        ),
        Shell::Zsh => format!(
            "\
#compdef {bin}
_{bin}() {{
    local -a notes
    notes=(${{(f)\"$({bin} -l 2>/dev/null)\"}})
    _arguments \\
        '-l[list notes]' \\
        '-a[include archived notes]' \\
        '-s[search note contents]:term:' \\
        '-d[archive matching notes]:pattern:' \\
        '-h[show help]' \\
        '*:note:($notes)'
}}
compdef _{bin} {bin}
"
        ),
        Shell::Fish => format!(
            "\
complete -c {bin} -f -a '({bin} -l 2>/dev/null)'
complete -c {bin} -s l -d 'list notes'
complete -c {bin} -s a -d 'include archived notes'
complete -c {bin} -s s -r -d 'search note contents'
complete -c {bin} -s d -r -d 'archive matching notes'
complete -c {bin} -s h -d 'show help'
"
        ),
    }
}

/// Short aliases for the common commands.
pub fn alias_script(shell: Shell, alias: &str, bin: &str) -> String {
    let lines = [
        (alias.to_string(), bin.to_string()),
        (format!("{alias}l"), format!("{bin} -l")),
        (format!("{alias}s"), format!("{bin} -s")),
    ];
    lines
        .iter()
        .map(|(name, cmd)| match shell {
            Shell::Fish => format!("alias {name} '{cmd}'\n"),
            Shell::Bash | Shell::Zsh => format!("alias {name}='{cmd}'\n"),
        })
        .collect()
}
