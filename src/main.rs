use std::env;
use std::io::{self, IsTerminal, Write};

use clap::Parser;

use befunge_shell::config;
use befunge_shell::repl::{self, BareLineSource, EditorLineSource, ModeFlagOverride, ReplMode};
use befunge_shell::{Shell, ShellError};

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [--bare|--editor] [--subruler <CHAR>]   # Start the Befunge debugging shell

Options:
  --bare              Force non-interactive bare mode
  --editor            Force interactive editor mode (errors if stdin is not a TTY)
  --subruler <CHAR>   Underline character for help subheaders (default '-')
  --help,  -h         Show this help

Description:
  An interactive shell that executes one Befunge instruction per line for
  debugging and teaching: digits push literals, commands operate on the
  stack and the PC direction. Type "help" inside the shell for the full
  instruction listing, and "quit", "exit", or Ctrl+D to leave.

Notes:
    - Ctrl+C exits the shell immediately.
    - The commands #, g, and p are recognized but not supported.
    - Mode selection:
        * Flags: --bare|--editor override environment and auto-detection.
        * Env: BEFSH_MODE=bare|editor overrides auto-detection.
        * Auto-detect: if stdin is a TTY, starts in interactive editor mode;
          otherwise, bare mode.
        * Prompts/banners suppressed if the stream is not a TTY.
    - Settings (prompt, ruler, subruler) load from ~/.config/befsh.toml,
      section [shell]; flags override the file.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "befsh", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Force non-interactive bare mode
    #[arg(long = "bare", conflicts_with = "editor")]
    bare: bool,

    /// Force interactive editor mode (errors if stdin is not a TTY)
    #[arg(long = "editor", conflicts_with = "bare")]
    editor: bool,

    /// Underline character for help subheaders
    #[arg(long = "subruler", value_name = "CHAR")]
    subruler: Option<char>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

fn main() {
    let program = env::args().next().unwrap_or_else(|| String::from("befsh"));

    let cli = Cli::parse();
    if cli.help {
        usage_and_exit(&program, 0);
    }

    let mode_flag = if cli.bare {
        ModeFlagOverride::Bare
    } else if cli.editor {
        ModeFlagOverride::Editor
    } else {
        ModeFlagOverride::None
    };

    let mode = match repl::select_mode(mode_flag) {
        Ok(m) => m,
        Err(msg) => {
            eprintln!("{program}: {msg}");
            let _ = io::stderr().flush();
            std::process::exit(1);
        }
    };

    // Install SIGINT (ctrl+c) handler to flush and exit(0) immediately
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        std::process::exit(1);
    }

    let mut cfg = config::config().clone();
    if let Some(ch) = cli.subruler {
        cfg.subruler = ch;
    }

    // Print the banner only if stderr is a TTY, keeping pipelines clean.
    if io::stderr().is_terminal() {
        eprintln!("Befunge shell: one instruction per line");
        eprintln!("Type \"help\" for the command listing and \"quit\" or Ctrl+D to leave");
        let _ = io::stderr().flush();
    }

    let code = match mode {
        ReplMode::Editor => {
            let source = match EditorLineSource::new() {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("{program}: failed to start line editor: {e}");
                    let _ = io::stderr().flush();
                    std::process::exit(1);
                }
            };
            let mut shell = Shell::new(source, io::stdout(), &cfg);
            finish(&program, shell.run())
        }
        ReplMode::Bare => {
            let source = BareLineSource::stdin();
            let mut shell = Shell::new(source, io::stdout(), &cfg);
            finish(&program, shell.run())
        }
    };

    std::process::exit(code);
}

fn finish(program: &str, result: Result<(), ShellError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{program}: {err}");
            let _ = io::stderr().flush();
            1
        }
    }
}
