// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{calculate_progress, format_file_size};
pub use input::{handle_confirm_input, handle_key_event, KeyAction};

use crate::domain::{
    Action, AppState, Decision, TransferKind, TransferMode, TransferPlan, TransferReport,
    TransferStatus,
};
use crate::preview::PreviewCache;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

/// Planned transfers listed in the plan overlay before truncating
const PLAN_LIST_LIMIT: usize = 12;

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Welcome screen shown on first launch
    Welcome,
    /// Main photo review view
    Browsing,
    /// Help overlay visible
    Help,
    /// Transfer plan overlay
    Plan,
    /// Confirmation dialog before executing the plan
    ConfirmTransfer,
    /// Result of the last execution
    Report,
}

/// Renders the main view: header with progress, photo preview with side
/// panel, footer with controls. `status` is shown in the footer title.
pub fn render(frame: &mut Frame, state: &AppState, cache: &mut PreviewCache, status: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with progress
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state);
    render_content(frame, chunks[1], state, cache);
    render_footer(frame, chunks[2], status);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let help_area = centered_rect(50, 80, area);

    // Clear background
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        shortcut_line("→ / k", ACCENT_SECONDARY, "Keep photo"),
        shortcut_line("← / d", ACCENT_PRIMARY, "Discard photo"),
        shortcut_line("u / Ctrl+Z", ACCENT_HIGHLIGHT, "Undo last decision"),
        Line::from(""),
        shortcut_line("p", TEXT_SECONDARY, "Show transfer plan"),
        shortcut_line("x", TEXT_SECONDARY, "Execute transfers"),
        shortcut_line("e", TEXT_SECONDARY, "Export decisions (CSV)"),
        shortcut_line("r", TEXT_SECONDARY, "Reload folder"),
        shortcut_line("o", TEXT_SECONDARY, "Open in system viewer"),
        Line::from(""),
        shortcut_line("?", TEXT_SECONDARY, "Toggle help"),
        shortcut_line("q / Esc", TEXT_SECONDARY, "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

fn shortcut_line(keys: &str, color: ratatui::style::Color, label: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}  ", keys), Style::default().fg(color)),
        Span::raw(format!("{:<24}", label)),
    ])
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(85, 85, frame.area());

    // Clear background
    frame.render_widget(Clear, area);

    let heading = Style::default()
        .fg(ACCENT_HIGHLIGHT)
        .add_modifier(Modifier::BOLD);

    let welcome_lines = vec![
        Line::from(""),
        Line::from(Span::styled("Welcome to pswp!", heading)),
        Line::from(""),
        Line::from(Span::raw(
            "pswp walks you through a folder of photos one at a time.",
        )),
        Line::from(Span::raw(
            "Decide what to keep, then copy or move everything in one go. RAW files follow their JPEG.",
        )),
        Line::from(""),
        Line::from(Span::styled("Quick Start:", heading)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  1. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Press "),
            Span::styled(
                "→",
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to "),
            Span::styled("keep", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(" or "),
            Span::styled(
                "←",
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to "),
            Span::styled("discard", Style::default().fg(ACCENT_PRIMARY)),
        ]),
        Line::from(vec![
            Span::styled("  2. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Press "),
            Span::styled("p", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" to review the transfer plan"),
        ]),
        Line::from(vec![
            Span::styled("  3. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Press "),
            Span::styled("x", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" and confirm to copy or move the files"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Safety Features:", heading)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  •  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Nothing is touched until you confirm a transfer"),
        ]),
        Line::from(vec![
            Span::styled("  •  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Existing files are never overwritten (name_1.jpg, name_2.jpg, ...)"),
        ]),
        Line::from(vec![
            Span::styled("  •  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Decisions are saved after every key press; quit and resume any time"),
        ]),
        Line::from(vec![
            Span::styled("  •  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Run with "),
            Span::styled("--dry-run", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" to see what would happen"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Press any key to start reviewing...", heading)),
        Line::from(""),
    ];

    let welcome_text = Paragraph::new(welcome_lines)
        .block(
            Block::default()
                .title(Span::styled(" Welcome to pswp ", heading))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(welcome_text, area);
}

/// Renders the transfer plan: counts, destinations, then the first transfers.
/// `estimated_bytes` comes from a dry run of the same plan.
pub fn render_plan_overlay(
    frame: &mut Frame,
    plan: &TransferPlan,
    mode: TransferMode,
    estimated_bytes: Option<u64>,
) {
    let plan_area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, plan_area);

    let block = Block::default()
        .title(format!(" Transfer Plan ({}) ", mode.as_str()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(plan_area);
    frame.render_widget(block, plan_area);

    let mut lines = plan_summary_lines(plan);
    if let Some(bytes) = estimated_bytes {
        lines.push(Line::from(vec![
            Span::styled("  ≈ ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Size:      "),
            Span::styled(format_file_size(bytes), Style::default().fg(TEXT_SECONDARY)),
        ]));
    }
    lines.push(Line::from(""));

    if plan.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nothing to transfer yet.",
            Style::default().fg(TEXT_SECONDARY),
        )));
    } else {
        for transfer in plan.transfers.iter().take(PLAN_LIST_LIMIT) {
            let color = action_color(transfer.action);
            let tag = match transfer.kind {
                TransferKind::Primary => "   ",
                TransferKind::Raw => "raw",
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<8}", transfer.action.as_str()), Style::default().fg(color)),
                Span::styled(format!("{} ", tag), Style::default().fg(TEXT_SECONDARY)),
                Span::raw(display_name(&transfer.source)),
                Span::styled("  →  ", Style::default().fg(TEXT_SECONDARY)),
                Span::raw(transfer.destination.display().to_string()),
            ]));
        }
        if plan.len() > PLAN_LIST_LIMIT {
            lines.push(Line::from(Span::styled(
                format!("  ... and {} more", plan.len() - PLAN_LIST_LIMIT),
                Style::default().fg(TEXT_SECONDARY),
            )));
        }
    }

    if !plan.unresolved.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  Not found on disk: {}", plan.unresolved.join(", ")),
            Style::default().fg(ACCENT_PRIMARY),
        )));
    }
    if !plan.ambiguous.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  Ambiguous RAW files skipped for: {}", plan.ambiguous.join(", ")),
            Style::default().fg(ACCENT_PRIMARY),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press x to execute, any other key to close",
        Style::default().fg(TEXT_SECONDARY),
    )));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, inner);
}

fn plan_summary_lines(plan: &TransferPlan) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Keep:     "),
            Span::styled(
                format!("{}", plan.count(Action::Keep)),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  ✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Discard:  "),
            Span::styled(
                format!("{}", plan.count(Action::Discard)),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  ○ ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("RAW files: "),
            Span::styled(
                format!("{}", plan.raw_count()),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
    ]
}

/// Renders the confirmation dialog shown before executing the plan
pub fn render_confirm_transfer_overlay(frame: &mut Frame, plan: &TransferPlan, mode: TransferMode) {
    let area = frame.area();
    let confirm_area = centered_rect(50, 60, area);

    // Clear background
    frame.render_widget(Clear, confirm_area);

    let block = Block::default()
        .title(" ⚠ Confirm Transfer ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_PRIMARY))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(confirm_area);
    frame.render_widget(block, confirm_area);

    let warning = match mode {
        TransferMode::Copy => "Originals stay where they are.",
        TransferMode::Move => "Originals will be removed from the source folder.",
    };

    let mut confirm_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} {} files?", capitalize(mode.as_str()), plan.len()),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    confirm_lines.extend(plan_summary_lines(plan));
    confirm_lines.extend([
        Line::from(""),
        Line::from(Span::styled(warning, Style::default().fg(TEXT_SECONDARY))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("es  "),
            Span::styled("[Enter]", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("     "),
            Span::styled("[N]", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("o  "),
            Span::styled("[Esc]", Style::default().fg(ACCENT_PRIMARY)),
        ]),
        Line::from(""),
    ]);

    let paragraph = Paragraph::new(confirm_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the outcome of an execution or dry run
pub fn render_report_overlay(frame: &mut Frame, report: &TransferReport) {
    let report_area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, report_area);

    let failed = report.failed();
    let border = if failed.is_empty() {
        ACCENT_SECONDARY
    } else {
        ACCENT_PRIMARY
    };
    let title = if report.dry_run {
        " Dry Run "
    } else {
        " Transfer Complete "
    };

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(report_area);
    frame.render_widget(block, report_area);

    let done_label = if report.dry_run {
        "Would transfer:"
    } else {
        "Transferred:"
    };
    let done = if report.dry_run {
        report
            .outcomes
            .iter()
            .filter(|o| o.status == TransferStatus::Planned)
            .count()
    } else {
        report.succeeded()
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("  {:<16}", done_label)),
            Span::styled(
                format!("{} files ({})", done, format_file_size(report.total_bytes)),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(format!("  {:<16}", "Failed:")),
            Span::styled(
                format!("{}", failed.len()),
                Style::default().fg(if failed.is_empty() {
                    TEXT_SECONDARY
                } else {
                    ACCENT_PRIMARY
                }),
            ),
        ]),
        Line::from(vec![
            Span::raw(format!("  {:<16}", "Mode:")),
            Span::styled(report.mode.as_str(), Style::default().fg(TEXT_SECONDARY)),
        ]),
        Line::from(""),
    ];

    for outcome in failed.iter().take(PLAN_LIST_LIMIT) {
        if let TransferStatus::Failed(reason) = &outcome.status {
            lines.push(Line::from(vec![
                Span::styled("  [!] ", Style::default().fg(ACCENT_PRIMARY)),
                Span::raw(format!("{}: {}", display_name(&outcome.source), reason)),
            ]));
        }
    }

    if !failed.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Decisions were kept so the transfer can be retried.",
            Style::default().fg(TEXT_SECONDARY),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to continue",
        Style::default().fg(TEXT_SECONDARY),
    )));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, inner);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn action_color(action: Action) -> ratatui::style::Color {
    match action {
        Action::Keep => ACCENT_SECONDARY,
        Action::Discard => ACCENT_PRIMARY,
    }
}

/// Renders the header with the photo position and a progress bar
fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let total = state.index.len();

    // Title and photo info
    let (title_text, file_info) = if let Some(item) = state.current_item() {
        (
            format!(" Photo {}/{} ", state.position() + 1, total),
            vec![
                Span::styled(
                    item.name.clone(),
                    Style::default()
                        .fg(TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!(
                        "({} • {})",
                        format_file_size(item.size),
                        item.modified_date.format("%Y-%m-%d %H:%M")
                    ),
                    Style::default().fg(TEXT_SECONDARY),
                ),
            ],
        )
    } else if total > 0 {
        (
            " Pswp ".to_string(),
            vec![Span::styled(
                "All photos reviewed",
                Style::default().fg(ACCENT_SECONDARY),
            )],
        )
    } else {
        (
            " Pswp ".to_string(),
            vec![Span::styled(
                "No photos to review",
                Style::default().fg(TEXT_SECONDARY),
            )],
        )
    };

    let title_line = Line::from(vec![
        Span::styled(
            title_text,
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", state.session.mode().as_str()),
            Style::default().fg(TEXT_SECONDARY),
        ),
    ]);

    let header = Paragraph::new(vec![title_line, Line::from(file_info)])
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(header, chunks[0]);

    // Progress bar
    let processed = state.position();
    let progress = calculate_progress(processed, total);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .gauge_style(Style::default().fg(ACCENT_SECONDARY).bg(BG_DARK))
        .ratio(progress)
        .label(format!(
            "{}% ({}/{})",
            (progress * 100.0) as u16,
            processed,
            total
        ));

    frame.render_widget(gauge, chunks[1]);
}

/// Renders the preview on the left and the decision panel on the right
fn render_content(frame: &mut Frame, area: Rect, state: &AppState, cache: &mut PreviewCache) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    match state.current_item() {
        Some(item) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR))
                .title(format!(" {} ", item.name));
            let inner = block.inner(chunks[0]);

            let paragraph = match cache.get_or_render(item, inner.width, inner.height) {
                Ok(preview) => Paragraph::new(preview.lines.clone())
                    .block(block)
                    .alignment(Alignment::Center),
                Err(e) => {
                    let error_lines = vec![
                        Line::from(""),
                        Line::from(Span::styled(
                            "  [!] Could not render preview",
                            Style::default()
                                .fg(ACCENT_PRIMARY)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::from(""),
                        Line::from(format!("  {}", e)),
                        Line::from(""),
                        Line::from(format!("  File: {}", item.name)),
                        Line::from(format!("  Size: {}", format_file_size(item.size))),
                        Line::from(Span::styled(
                            "  Press o to open it in the system viewer",
                            Style::default().fg(TEXT_SECONDARY),
                        )),
                    ];
                    Paragraph::new(error_lines)
                        .block(block.border_style(Style::default().fg(ACCENT_PRIMARY)))
                        .style(Style::default().fg(TEXT_PRIMARY))
                        .wrap(Wrap { trim: false })
                }
            };
            frame.render_widget(paragraph, chunks[0]);
        }
        None => frame.render_widget(render_empty_state_widget(state), chunks[0]),
    }

    frame.render_widget(render_info_panel(state), chunks[1]);
}

/// Side panel: counts, current decision and RAW siblings
fn render_info_panel(state: &AppState) -> Paragraph<'static> {
    let stats = state.statistics();
    let remaining = stats.total_files.saturating_sub(stats.position);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Kept:      "),
            Span::styled(
                format!("{}", stats.kept),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" ✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Discarded: "),
            Span::styled(
                format!("{}", stats.discarded),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" ○ ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Remaining: "),
            Span::styled(format!("{}", remaining), Style::default().fg(TEXT_SECONDARY)),
        ]),
        Line::from(vec![
            Span::raw("   Position:  "),
            Span::styled(
                format!("{}/{}", stats.position, stats.total_files),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
        Line::from(""),
    ];

    if let Some(item) = state.current_item() {
        let (label, color) = match state.decision_for(&item.name) {
            Decision::Keep => ("keep", ACCENT_SECONDARY),
            Decision::Discard => ("discard", ACCENT_PRIMARY),
            Decision::Undecided => ("undecided", TEXT_SECONDARY),
        };
        lines.push(Line::from(vec![
            Span::raw(" Decision: "),
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(""));

        let siblings = state.index.raw_siblings(item.stem());
        if siblings.is_empty() {
            lines.push(Line::from(Span::styled(
                " No RAW files",
                Style::default().fg(TEXT_SECONDARY),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                " RAW files:",
                Style::default().fg(ACCENT_HIGHLIGHT),
            )));
            for path in &siblings {
                lines.push(Line::from(format!("  {}", display_name(path))));
            }
        }
    }

    if let Some(notice) = state.index.notice() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" [!] {}", notice),
            Style::default().fg(ACCENT_PRIMARY),
        )));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR))
                .title(" Session "),
        )
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false })
}

/// Creates the widget shown when there is no current photo
fn render_empty_state_widget(state: &AppState) -> Paragraph<'static> {
    let (title, hint) = if state.index.is_empty() {
        (
            "No Photos Found",
            "The folder is missing or holds no images. Press r to reload.",
        )
    } else {
        (
            "Review Complete",
            "Press p to see the plan, x to execute, u to undo.",
        )
    };

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(TEXT_SECONDARY))),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR))
                .title(" Preview "),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
}

/// Renders the footer with styled controls
fn render_footer(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let controls = Line::from(vec![
        Span::styled(
            " ← ",
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Discard", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "→ ",
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Keep", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("u ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled("Undo", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("p ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Plan", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Help", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR));
    if let Some(message) = status {
        block = block.title(Span::styled(
            format!(" {} ", message),
            Style::default().fg(ACCENT_HIGHLIGHT),
        ));
    }

    let footer = Paragraph::new(controls)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
