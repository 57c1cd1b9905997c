use pswp::cli::{AppConfig, Args};
use pswp::config::UserConfig;
use pswp::domain::{
    self, Action, AppState, ExecuteOptions, RecordOutcome, SessionStore, TransferKind,
    TransferPlan, TransferReport, TransferStatus,
};
use pswp::logging::{self, LogTarget};
use pswp::preview::PreviewCache;
use pswp::tui::{
    self, format_file_size, handle_confirm_input, handle_key_event, render_confirm_transfer_overlay,
    render_help_overlay, render_plan_overlay, render_report_overlay, render_welcome_overlay,
    KeyAction, ViewState,
};
use pswp::{open_file, PswpError, Result};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::Path;
use std::process::ExitCode;
use std::{io, time::Duration};
use tracing::warn;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse_args();

    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    let config = AppConfig::resolve(args, &user_config);

    // Validate arguments
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // The terminal UI owns stderr, so it logs to a file
    let log_target = if config.is_headless() {
        Some(LogTarget::Stderr)
    } else {
        logging::default_log_path().map(LogTarget::File)
    };
    if let Some(target) = &log_target {
        logging::init(config.verbose, target);
    }

    let store = SessionStore::new(config.session_file.clone());
    let mut app_state = AppState::open(
        &config.directory,
        config.mode,
        store,
        config.plan_options(),
    );

    if config.reset {
        if let Err(e) = app_state.reset() {
            eprintln!("Error: Failed to reset session: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let result = if config.is_headless() {
        run_headless(&config, &mut app_state)
    } else {
        run_app_with_config(&config, &mut app_state, &mut user_config)
    };

    match result {
        Ok(code) => code,
        Err(PswpError::NotConfirmed) => {
            eprintln!("Error: Transfer not confirmed. Pass --yes to execute, or --dry-run to preview.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs --export, --plan and --execute without opening the terminal UI
fn run_headless(config: &AppConfig, app_state: &mut AppState) -> Result<ExitCode> {
    if let Some(notice) = app_state.index.notice() {
        eprintln!("Warning: {}", notice);
    }

    if let Some(dir) = &config.export_dir {
        let path = app_state.export(dir)?;
        println!(
            "Exported {} decisions to {}",
            app_state.session.decided().len(),
            path.display()
        );
    }

    if config.print_plan {
        let plan = app_state.plan();
        print_plan(&plan);
        if config.dry_run && !config.execute {
            let estimate = domain::execute(
                &plan,
                app_state.session.mode(),
                ExecuteOptions {
                    confirmed: false,
                    dry_run: true,
                },
            )?;
            print_report(&estimate);
        }
    }

    if config.execute {
        let report = app_state.execute(ExecuteOptions {
            confirmed: config.assume_yes,
            dry_run: config.dry_run,
        })?;
        print_report(&report);
        if report.has_failures() {
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_plan(plan: &TransferPlan) {
    println!(
        "Plan: {} keep, {} discard, {} RAW files",
        plan.count(Action::Keep),
        plan.count(Action::Discard),
        plan.raw_count()
    );

    for transfer in &plan.transfers {
        let tag = match transfer.kind {
            TransferKind::Primary => "",
            TransferKind::Raw => " (raw)",
        };
        println!(
            "  {:<8}{} -> {}{}",
            transfer.action.as_str(),
            transfer.source.display(),
            transfer.destination.display(),
            tag
        );
    }

    if !plan.raw_report.is_empty() {
        println!("RAW siblings:");
        for (name, raws) in &plan.raw_report {
            if raws.is_empty() {
                println!("  {}: none", name);
            } else {
                println!("  {}: {}", name, raws.join(", "));
            }
        }
    }

    for name in &plan.unresolved {
        println!("  not found on disk: {}", name);
    }
    for name in &plan.ambiguous {
        println!("  ambiguous RAW files skipped: {}", name);
    }
}

fn print_report(report: &TransferReport) {
    let label = if report.dry_run {
        "[DRY RUN] Would transfer"
    } else {
        "Transferred"
    };
    let done = report
        .outcomes
        .iter()
        .filter(|o| matches!(o.status, TransferStatus::Done | TransferStatus::Planned))
        .count();

    println!(
        "{}: {} files ({}) by {}",
        label,
        done,
        format_file_size(report.total_bytes),
        report.mode.as_str()
    );

    for outcome in report.failed() {
        if let TransferStatus::Failed(reason) = &outcome.status {
            println!("  failed: {}: {}", outcome.source.display(), reason);
        }
    }
}

/// Runs the TUI application with configuration
fn run_app_with_config(
    config: &AppConfig,
    app_state: &mut AppState,
    user_config: &mut UserConfig,
) -> Result<ExitCode> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, app_state, config, user_config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print summary after exit
    let stats = app_state.statistics();
    println!(
        "Reviewed {}/{} photos: {} kept, {} discarded",
        stats.position, stats.total_files, stats.kept, stats.discarded
    );

    result.map(|_| ExitCode::SUCCESS)
}

/// Suspends the TUI terminal to allow external programs to run
fn suspend_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Resumes the TUI terminal after external program exits
fn resume_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(())
}

/// Runs the plan and returns the view to show next with a status line
fn run_transfer(
    app_state: &mut AppState,
    options: ExecuteOptions,
    last_report: &mut Option<TransferReport>,
) -> (ViewState, String) {
    match app_state.execute(options) {
        Ok(report) => {
            let status = if report.dry_run {
                format!("Dry run: {} files", report.outcomes.len())
            } else if report.has_failures() {
                format!("{} transfers failed", report.failed().len())
            } else {
                format!("Transferred {} files", report.succeeded())
            };
            *last_report = Some(report);
            (ViewState::Report, status)
        }
        Err(e) => (ViewState::Browsing, format!("Transfer failed: {}", e)),
    }
}

fn record_status(result: Result<RecordOutcome>) -> Option<String> {
    match result {
        Ok(RecordOutcome::Recorded) | Ok(RecordOutcome::Stale) => None,
        Ok(RecordOutcome::ReviewComplete) => {
            Some("All photos reviewed. Press p for the plan".to_string())
        }
        Err(e) => Some(format!("Could not save session: {}", e)),
    }
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    config: &AppConfig,
    user_config: &mut UserConfig,
) -> Result<()> {
    // Show welcome on first launch or if --welcome flag is set
    let should_show_welcome = config.show_welcome || !user_config.welcome_shown;
    let mut view_state = if should_show_welcome {
        ViewState::Welcome
    } else {
        ViewState::Browsing
    };

    let mut cache = PreviewCache::new();
    let mut status: Option<String> = app_state.index.notice().map(str::to_string);
    let mut plan: Option<TransferPlan> = None;
    let mut estimate: Option<u64> = None;
    let mut last_report: Option<TransferReport> = None;

    loop {
        // Render based on current view state
        terminal.draw(|frame| {
            tui::render(frame, app_state, &mut cache, status.as_deref());

            // Render overlays
            match view_state {
                ViewState::Help => render_help_overlay(frame),
                ViewState::Welcome => render_welcome_overlay(frame),
                ViewState::Plan => {
                    if let Some(plan) = &plan {
                        render_plan_overlay(frame, plan, app_state.session.mode(), estimate);
                    }
                }
                ViewState::ConfirmTransfer => {
                    if let Some(plan) = &plan {
                        render_confirm_transfer_overlay(frame, plan, app_state.session.mode());
                    }
                }
                ViewState::Report => {
                    if let Some(report) = &last_report {
                        render_report_overlay(frame, report);
                    }
                }
                ViewState::Browsing => {}
            }
        })?;

        // Handle input
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        // Handle overlay-specific input
        match view_state {
            ViewState::Help => {
                // Any key closes help (or toggle with ?)
                let action = handle_key_event(key);
                if matches!(action, KeyAction::Help | KeyAction::Quit | KeyAction::None) {
                    view_state = ViewState::Browsing;
                }
                continue;
            }
            ViewState::Welcome => {
                // Any key dismisses welcome and starts reviewing
                view_state = ViewState::Browsing;

                // Mark welcome as shown and persist
                user_config.welcome_shown = true;
                if let Err(e) = user_config.save() {
                    warn!(error = %e, "failed to save user config");
                }
                continue;
            }
            ViewState::Plan => {
                if handle_key_event(key) == KeyAction::Execute {
                    view_state = ViewState::ConfirmTransfer;
                } else {
                    view_state = ViewState::Browsing;
                }
                continue;
            }
            ViewState::ConfirmTransfer => {
                match handle_confirm_input(key) {
                    KeyAction::ConfirmTransfer => {
                        let options = ExecuteOptions {
                            confirmed: true,
                            dry_run: config.dry_run,
                        };
                        let (next, message) = run_transfer(app_state, options, &mut last_report);
                        view_state = next;
                        status = Some(message);
                        cache.reset();
                    }
                    KeyAction::CancelTransfer => {
                        view_state = ViewState::Browsing;
                        status = Some("Transfer cancelled".to_string());
                    }
                    _ => {}
                }
                continue;
            }
            ViewState::Report => {
                // Any key closes the report
                view_state = ViewState::Browsing;
                continue;
            }
            ViewState::Browsing => {}
        }

        match handle_key_event(key) {
            KeyAction::Quit => break,
            KeyAction::Keep => {
                status = record_status(app_state.keep_current());
            }
            KeyAction::Discard => {
                status = record_status(app_state.discard_current());
            }
            KeyAction::Undo => {
                status = match app_state.undo() {
                    Ok(Some(entry)) => Some(format!(
                        "Undid {} of {}",
                        entry.action.as_str(),
                        entry.item_name
                    )),
                    Ok(None) => Some("Nothing to undo".to_string()),
                    Err(e) => Some(format!("Could not save session: {}", e)),
                };
            }
            KeyAction::Plan => {
                let current = app_state.plan();
                estimate = domain::execute(
                    &current,
                    app_state.session.mode(),
                    ExecuteOptions {
                        confirmed: false,
                        dry_run: true,
                    },
                )
                .ok()
                .map(|report| report.total_bytes);
                plan = Some(current);
                view_state = ViewState::Plan;
            }
            KeyAction::Execute => {
                let current = app_state.plan();
                if current.is_empty() {
                    status = Some("Nothing to transfer".to_string());
                } else if config.assume_yes {
                    let options = ExecuteOptions {
                        confirmed: true,
                        dry_run: config.dry_run,
                    };
                    let (next, message) = run_transfer(app_state, options, &mut last_report);
                    view_state = next;
                    status = Some(message);
                    cache.reset();
                } else {
                    plan = Some(current);
                    view_state = ViewState::ConfirmTransfer;
                }
            }
            KeyAction::Export => {
                status = match app_state.export(Path::new(".")) {
                    Ok(path) => Some(format!("Exported to {}", path.display())),
                    Err(e) => Some(format!("Export failed: {}", e)),
                };
            }
            KeyAction::Reload => {
                app_state.reload();
                cache.reset();
                status = Some(match app_state.index.notice() {
                    Some(notice) => notice.to_string(),
                    None => format!("Reloaded {} photos", app_state.index.len()),
                });
            }
            KeyAction::Help => {
                view_state = ViewState::Help;
            }
            KeyAction::Open => {
                if let Some(path) = app_state.current_item().map(|item| item.path.clone()) {
                    // Suspend terminal before opening external program
                    suspend_terminal(terminal)?;

                    // Open the file (blocking call)
                    let open_result = open_file(&path);

                    // Resume terminal after external program exits
                    resume_terminal(terminal)?;

                    // Handle any errors from opening the file
                    if let Err(e) = open_result {
                        status = Some(format!("Failed to open file: {}", e));
                    }
                }
            }
            KeyAction::ConfirmTransfer | KeyAction::CancelTransfer => {
                // These actions are only handled in ConfirmTransfer state
            }
            KeyAction::None => {}
        }
    }

    Ok(())
}
