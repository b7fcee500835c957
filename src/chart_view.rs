use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Tabs};

use crate::charts::{ChartSet, OutcomeShare, ScoringProfile};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
enum ChartTab {
    Outcomes(Vec<OutcomeShare>),
    TotalGoals(Vec<ScoringProfile>),
    AvgGoals(Vec<ScoringProfile>),
}

impl ChartTab {
    fn title(&self) -> &'static str {
        match self {
            Self::Outcomes(_) => "W/D/L %",
            Self::TotalGoals(_) => "Total goals",
            Self::AvgGoals(_) => "Average score",
        }
    }
}

struct ChartView {
    tabs: Vec<ChartTab>,
    selected: usize,
    should_quit: bool,
}

impl ChartView {
    fn new(charts: &ChartSet) -> Self {
        let mut tabs = Vec::new();
        if let Some(shares) = &charts.shares {
            tabs.push(ChartTab::Outcomes(shares.clone()));
        }
        if let Some(scoring) = &charts.scoring {
            tabs.push(ChartTab::TotalGoals(scoring.clone()));
            tabs.push(ChartTab::AvgGoals(scoring.clone()));
        }
        Self {
            tabs,
            selected: 0,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let count = self.tabs.len().max(1);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                self.selected = (self.selected + count - 1) % count;
            }
            _ => {}
        }
    }
}

/// Show the charts full-screen until the user quits.
pub fn show_charts(charts: &ChartSet) -> io::Result<()> {
    let mut view = ChartView::new(charts);
    if view.tabs.is_empty() {
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_view(&mut terminal, &mut view);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run_view<B: Backend>(terminal: &mut Terminal<B>, view: &mut ChartView) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, view))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    view.on_key(key);
                }
            }
        }

        if view.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, view: &ChartView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let tabs = Tabs::new(view.tabs.iter().map(ChartTab::title).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title("Team stats"))
        .select(view.selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    if let Some(tab) = view.tabs.get(view.selected) {
        let block = Block::default().borders(Borders::ALL).title(tab.title());
        let chart = match tab {
            ChartTab::Outcomes(shares) => outcome_chart(shares),
            ChartTab::TotalGoals(scoring) => total_goals_chart(scoring),
            ChartTab::AvgGoals(scoring) => avg_goals_chart(scoring),
        };
        frame.render_widget(chart.block(block), chunks[1]);
    }

    let footer = Paragraph::new("←/→ h/l Tab Switch chart | q Quit");
    frame.render_widget(footer, chunks[2]);
}

fn outcome_chart(shares: &[OutcomeShare]) -> BarChart<'static> {
    let mut chart = BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1)
        .max(100);
    for share in shares {
        let bars = [
            pct_bar("W", share.win_pct, Color::Green),
            pct_bar("D", share.draw_pct, Color::Yellow),
            pct_bar("L", share.loss_pct, Color::Red),
        ];
        let label = format!("{} ({})", share.team, share.played);
        chart = chart.data(BarGroup::default().label(Line::from(label)).bars(&bars));
    }
    chart
}

fn pct_bar(label: &'static str, pct: f64, color: Color) -> Bar<'static> {
    Bar::default()
        .label(Line::from(label))
        .value(pct.round() as u64)
        .text_value(format!("{pct:.0}%"))
        .style(Style::default().fg(color))
}

fn total_goals_chart(scoring: &[ScoringProfile]) -> BarChart<'static> {
    let bars = scoring
        .iter()
        .map(|row| {
            Bar::default()
                .label(Line::from(row.team.clone()))
                .value(u64::from(row.total_goals))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect::<Vec<_>>();
    BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars))
}

fn avg_goals_chart(scoring: &[ScoringProfile]) -> BarChart<'static> {
    // Bars take integers, so averages are drawn in hundredths.
    let bars = scoring
        .iter()
        .map(|row| {
            Bar::default()
                .label(Line::from(row.team.clone()))
                .value((row.avg_goals * 100.0).round() as u64)
                .text_value(format!("{:.2}", row.avg_goals))
                .style(Style::default().fg(Color::Magenta))
        })
        .collect::<Vec<_>>();
    BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars))
}
