//! Interactive menu over the hosts-file blocking engine.
//!
//! Needs a privileged process to touch the real hosts file; when it is not,
//! mutations report access-denied and the session keeps running.

mod platform;

use std::io::{self, Write};

use hostblock_core::backup::RestoreOutcome;
use hostblock_core::error::{BlockerError, BlockerResult};
use hostblock_core::paths::EnginePaths;
use hostblock_core::workflow::BlockerEngine;

fn main() {
    let hosts = platform::hosts_path();
    let data_dir = platform::data_dir();
    let paths = EnginePaths::under_data_dir(&hosts, &data_dir);
    let engine = BlockerEngine::new(paths);

    println!("hostblock - hosts file site blocker");
    println!("hosts file: {}", hosts.display());

    if !platform::can_write(&hosts) {
        eprintln!(
            "warning: {} is not writable; re-run elevated (sudo / Administrator)",
            hosts.display()
        );
    }

    match engine.backups().ensure_original_backup() {
        Ok(true) => println!(
            "Saved original hosts backup: {}",
            engine.paths().original_backup.display()
        ),
        Ok(false) => {}
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }

    loop {
        print_menu();
        let Some(choice) = prompt("Select an option: ") else {
            return;
        };
        match choice.as_str() {
            "1" => list_hosts(&engine),
            "2" => {
                let Some(site) = prompt("Site to block: ") else {
                    return;
                };
                if site.is_empty() {
                    continue;
                }
                if report(engine.block_site(&site)).is_some() {
                    println!("Added {site} to the hosts file.");
                    platform::flush_dns();
                }
            }
            "3" => {
                let Some(site) = prompt("Site to unblock: ") else {
                    return;
                };
                if site.is_empty() {
                    continue;
                }
                match report(engine.unblock_site(&site)) {
                    Some(true) => {
                        println!("Removed {site}.");
                        platform::flush_dns();
                    }
                    Some(false) => println!("{site} is not blocked."),
                    None => {}
                }
            }
            "4" => return,
            "5" => {
                if let Some(outcome) = report(engine.restore_default()) {
                    print_restore(outcome);
                }
            }
            "6" => {
                if let Some(outcome) = report(engine.restore_original()) {
                    print_restore(outcome);
                }
            }
            "7" => apply_category(&engine),
            other => println!("unknown option: {other}"),
        }
    }
}

fn print_menu() {
    println!("###################################");
    println!("1. List hosts file");
    println!("2. Block a site");
    println!("3. Unblock a site");
    println!("4. Exit");
    println!("5. Restore DEFAULT hosts");
    println!("6. Restore ORIGINAL hosts");
    println!("7. Apply a blocklist category");
    println!("###################################");
}

fn list_hosts(engine: &BlockerEngine) {
    match engine.list_hosts() {
        Ok(lines) => {
            println!("=====HOSTS BEGIN=====");
            for line in lines {
                println!("{line}");
            }
            println!("=====HOSTS END=====");
        }
        Err(err) => eprintln!("error: {err}"),
    }
}

fn apply_category(engine: &BlockerEngine) {
    let dir = platform::data_dir().join("blocklist");
    let files = platform::blocklist_files(&dir);
    if files.is_empty() {
        println!("No blocklist files found in {}", dir.display());
        return;
    }

    println!("=====BLOCK LISTS=====");
    for (idx, file) in files.iter().enumerate() {
        let name = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("(unnamed)");
        println!("{}. {}", idx + 1, name);
    }

    let Some(choice) = prompt("Select a category: ") else {
        return;
    };
    let Some(file) = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|n| files.get(n))
    else {
        println!("unknown category: {choice}");
        return;
    };

    if let Some(outcome) = report(engine.apply_blocklist(file)) {
        println!(
            "Applied category '{}': {} entries from {} presets.",
            outcome.category, outcome.entries, outcome.presets
        );
        platform::flush_dns();
    }
}

fn print_restore(outcome: RestoreOutcome) {
    match outcome {
        RestoreOutcome::Restored { snapshot } => {
            println!("Restored hosts file. Previous contents: {}", snapshot.display());
            platform::flush_dns();
        }
        RestoreOutcome::TemplateMissing => {
            println!("Default template (hosts_default.txt) not found.");
        }
        RestoreOutcome::OriginalBackupMissing => {
            println!("No original backup found.");
        }
    }
}

/// Print errors and flatten to Option so the menu loop never dies on a
/// failed operation.
fn report<T>(result: BlockerResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(BlockerError::AccessDenied(path)) => {
            eprintln!("Access denied writing {path}. Re-run elevated (sudo / Administrator).");
            None
        }
        Err(err) => {
            eprintln!("error: {err}");
            None
        }
    }
}

/// Read one trimmed line from stdin; `None` on EOF or a broken pipe.
fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}
