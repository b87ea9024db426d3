//! Manager squad, summary, transfers, performance and value tools.

use std::collections::HashMap;

use super::{
    failure,
    format::{index_by_id, last_n, mean, money, position_emoji, team_short_name, thousands},
    input::{
        parse_tool_input, TeamIdGameweekParams, TeamIdParams, TeamPerformanceParams,
        TeamTransfersParams, ToolInput,
    },
};
use crate::{
    cli::types::ManagerId,
    fpl::{types::to_millions, FplContext, Position, Record},
    Result,
};

/// Squad slots 1..=11 start; 12..=15 are the bench.
const STARTING_SLOTS: i64 = 11;

/// Bootstrap players and teams keyed by id, for pick and transfer lookups.
struct Lookups {
    players: HashMap<i64, Record>,
    teams: HashMap<i64, Record>,
}

impl Lookups {
    async fn load(ctx: &FplContext) -> Result<Self> {
        Ok(Self {
            players: index_by_id(ctx.bootstrap.players().await?),
            teams: index_by_id(ctx.bootstrap.teams().await?),
        })
    }

    fn player(&self, id: i64) -> Option<&Record> {
        self.players.get(&id)
    }

    fn club(&self, player: &Record) -> String {
        team_short_name(&self.teams, player.i64_field("team"))
    }
}

async fn gameweek_or_current(ctx: &FplContext, gameweek: Option<i64>) -> Result<i64> {
    match gameweek {
        Some(gw) => Ok(gw),
        None => Ok(ctx
            .bootstrap
            .current_gameweek()
            .await?
            .map(|gw| gw.id())
            .unwrap_or(1)),
    }
}

fn rank_change_line(change: i64) -> String {
    match change {
        c if c > 0 => format!("• Rank Change: ⬆️ +{} (improved)", thousands(c)),
        c if c < 0 => format!("• Rank Change: ⬇️ {} (dropped)", thousands(c)),
        _ => "• Rank Change: ➡️ No change".to_string(),
    }
}

pub async fn get_my_team(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<TeamIdGameweekParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    let manager = ManagerId::new(params.team_id);
    match render_team(ctx, manager, params.gameweek).await {
        Ok(text) => text,
        Err(err) => failure("fetching team data", &err),
    }
}

async fn render_team(ctx: &FplContext, manager: ManagerId, gameweek: Option<i64>) -> Result<String> {
    let gameweek = gameweek_or_current(ctx, gameweek).await?;
    let selection = ctx.managers.picks(manager, gameweek).await?;
    let mut picks = selection.records("picks");
    if picks.is_empty() {
        return Ok(format!(
            "No team data found for Team ID {manager} in Gameweek {gameweek}"
        ));
    }
    let lookups = Lookups::load(ctx).await?;
    picks.sort_by_key(|pick| pick.i64_field("position"));
    let (starting, bench): (Vec<Record>, Vec<Record>) = picks
        .into_iter()
        .partition(|pick| pick.i64_field("position") <= STARTING_SLOTS);

    let mut by_position: HashMap<Position, Vec<(&Record, &Record)>> = HashMap::new();
    for pick in &starting {
        if let Some(player) = lookups.player(pick.i64_field("element")) {
            if let Some(position) = Position::from_element_type(player.i64_field("element_type")) {
                by_position.entry(position).or_default().push((pick, player));
            }
        }
    }
    let count = |position: Position| by_position.get(&position).map_or(0, Vec::len);
    let formation = format!(
        "{}-{}-{}",
        count(Position::Defender),
        count(Position::Midfielder),
        count(Position::Forward)
    );

    let mut lines = vec![
        format!("🏆 **Your FPL Team - Gameweek {gameweek}**"),
        String::new(),
        format!("**Formation: {formation}**"),
        String::new(),
    ];
    for position in Position::ALL {
        let Some(players) = by_position.get(&position) else {
            continue;
        };
        let label = match position {
            Position::Goalkeeper => position.to_string(),
            _ => position.plural().to_string(),
        };
        lines.push(format!("{} {}:", position_emoji(position), label));
        for (pick, player) in players {
            let captain = if pick.bool_field("is_captain") { " ⓒ" } else { "" };
            let vice = if pick.bool_field("is_vice_captain") { " ⓥ" } else { "" };
            lines.push(format!(
                "{}. {} ({}){}{} - {} - {} pts",
                pick.i64_field("position"),
                player.display_name(),
                lookups.club(player),
                captain,
                vice,
                money(player.price()),
                player.i64_field("total_points")
            ));
        }
        lines.push(String::new());
    }

    lines.push("🪑 **Bench:**".to_string());
    for pick in &bench {
        if let Some(player) = lookups.player(pick.i64_field("element")) {
            lines.push(format!(
                "{}. {} ({}) - {} - {} pts",
                pick.i64_field("position"),
                player.display_name(),
                lookups.club(player),
                money(player.price()),
                player.i64_field("total_points")
            ));
        }
    }

    let history = selection.record("entry_history");
    lines.push(String::new());
    lines.push(format!(
        "💰 **Team Value:** {} | **Bank:** {}",
        money(to_millions(history.i64_field("value"))),
        money(to_millions(history.i64_field("bank")))
    ));
    lines.push(format!(
        "📊 **Gameweek {}:** {} pts | **Overall:** {} pts",
        gameweek,
        history.i64_field("points"),
        history.i64_field("total_points")
    ));
    let on_bench = history.i64_field("points_on_bench");
    if on_bench > 0 {
        lines.push(format!("🪑 **Points on Bench:** {on_bench} pts"));
    }
    if let Some(chip) = selection.get("active_chip").and_then(|c| c.as_str()) {
        lines.push(format!("🎲 **Active Chip:** {chip}"));
    }
    Ok(lines.join("\n"))
}

pub async fn get_my_team_summary(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<TeamIdParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    match render_summary(ctx, params.manager()).await {
        Ok(text) => text,
        Err(err) => failure("fetching team summary", &err),
    }
}

async fn render_summary(ctx: &FplContext, manager: ManagerId) -> Result<String> {
    let summary = ctx.managers.team_summary(manager).await?;
    let season = ctx.managers.history(manager).await?.records("current");

    let or_unknown = |s: &str| {
        if s.is_empty() {
            "Unknown".to_string()
        } else {
            s.to_string()
        }
    };
    let mut lines = vec![
        "📊 **FPL Team Summary**".to_string(),
        String::new(),
        format!("**Team Name:** {}", or_unknown(&summary.team_name)),
        format!("**Manager:** {}", or_unknown(&summary.manager_name)),
        String::new(),
        "**Overall Performance:**".to_string(),
        format!("• Total Points: {}", thousands(summary.total_points)),
        format!("• Overall Rank: {}", thousands(summary.overall_rank)),
        format!("• Current Gameweek: {}", summary.current_gameweek),
        String::new(),
        "**Team Value:**".to_string(),
        format!("• Squad Value: {}", money(summary.team_value)),
        format!("• In Bank: {}", money(summary.bank)),
        format!("• Total Transfers: {}", summary.total_transfers),
    ];

    if !season.is_empty() {
        let recent = last_n(&season, 5);
        let points: Vec<i64> = recent.iter().map(|gw| gw.i64_field("points")).collect();
        let joined: Vec<String> = points.iter().map(i64::to_string).collect();
        lines.push(String::new());
        lines.push(format!("**Recent Form (Last {} GWs):**", recent.len()));
        lines.push(format!("• Points: {}", joined.join(" | ")));
        lines.push(format!("• Average: {:.1} pts per GW", mean(&points)));
        if let [.., previous, latest] = season.as_slice() {
            lines.push(rank_change_line(
                previous.i64_field("overall_rank") - latest.i64_field("overall_rank"),
            ));
        }
    }
    Ok(lines.join("\n"))
}

pub async fn get_my_transfers(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<TeamTransfersParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    match render_transfers(ctx, ManagerId::new(params.team_id), params.limit).await {
        Ok(text) => text,
        Err(err) => failure("fetching transfers", &err),
    }
}

async fn render_transfers(ctx: &FplContext, manager: ManagerId, limit: usize) -> Result<String> {
    let transfers = ctx.managers.transfers(manager).await?;
    if transfers.is_empty() {
        return Ok("No transfers made this season yet.".to_string());
    }
    let lookups = Lookups::load(ctx).await?;
    let recent: Vec<&Record> = last_n(&transfers, limit).iter().rev().collect();

    let describe = |id: i64| match lookups.player(id) {
        Some(player) => format!("{} ({})", player.display_name(), lookups.club(player)),
        None => "Unknown (UNK)".to_string(),
    };
    let mut lines = vec![
        format!("🔄 **Recent Transfers (Last {})**", recent.len()),
        String::new(),
    ];
    for transfer in recent {
        lines.push(format!(
            "**GW{}:** {} ➡️ {} - {}",
            transfer.display_field("event"),
            describe(transfer.i64_field("element_out")),
            describe(transfer.i64_field("element_in")),
            money(to_millions(transfer.i64_field("element_in_cost")))
        ));
    }
    Ok(lines.join("\n"))
}

pub async fn analyze_my_team_performance(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<TeamPerformanceParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    let manager = ManagerId::new(params.team_id);
    match ctx.managers.history(manager).await {
        Ok(history) => render_performance(&history.records("current"), params.last_n_weeks.max(1)),
        Err(err) => failure("analyzing performance", &err),
    }
}

/// Points, league-average comparison, rank movement and bench waste over
/// the last `weeks` gameweeks of an `entry/{id}/history/` `current` list.
pub fn render_performance(season: &[Record], weeks: usize) -> String {
    if season.is_empty() {
        return "No gameweek history available yet.".to_string();
    }
    let recent = last_n(season, weeks);
    let points: Vec<i64> = recent.iter().map(|gw| gw.i64_field("points")).collect();
    let averages: Vec<i64> = recent.iter().map(|gw| gw.i64_field("event_average")).collect();
    let bench: Vec<i64> = recent.iter().map(|gw| gw.i64_field("points_on_bench")).collect();
    let avg_points = mean(&points);
    let avg_league = mean(&averages);

    let mut lines = vec![
        format!(
            "📈 **Team Performance Analysis (Last {} Gameweeks)**",
            recent.len()
        ),
        String::new(),
        "**Points Summary:**".to_string(),
        format!("• Total: {} pts", points.iter().sum::<i64>()),
        format!("• Average: {avg_points:.1} pts/GW"),
        format!("• Best GW: {} pts", points.iter().max().copied().unwrap_or(0)),
        format!("• Worst GW: {} pts", points.iter().min().copied().unwrap_or(0)),
        String::new(),
    ];

    if avg_league > 0.0 {
        let diff = avg_points - avg_league;
        if diff > 0.0 {
            lines.push(format!("• Performance: ⬆️ {diff:.1} pts above average"));
        } else {
            lines.push(format!("• Performance: ⬇️ {:.1} pts below average", diff.abs()));
        }
        lines.push(String::new());
    }

    if let [first, .., last] = recent {
        let start = first.i64_field("overall_rank");
        let end = last.i64_field("overall_rank");
        lines.push("**Rank Movement:**".to_string());
        lines.push(format!("• Starting Rank: {}", thousands(start)));
        lines.push(format!("• Current Rank: {}", thousands(end)));
        lines.push(match start - end {
            c if c > 0 => format!("• Change: ⬆️ Improved by {} places", thousands(c)),
            c if c < 0 => format!("• Change: ⬇️ Dropped {} places", thousands(-c)),
            _ => "• Change: ➡️ No change".to_string(),
        });
        lines.push(String::new());
    }

    lines.push("**Bench Analysis:**".to_string());
    lines.push(format!(
        "• Total Points Left on Bench: {} pts",
        bench.iter().sum::<i64>()
    ));
    lines.push(format!("• Average per GW: {:.1} pts", mean(&bench)));
    lines.push(String::new());

    lines.push("**Gameweek Breakdown:**".to_string());
    for gw in recent {
        let pts = gw.i64_field("points");
        let avg = gw.i64_field("event_average");
        let mark = if pts >= avg { "✅" } else { "⚠️" };
        lines.push(format!(
            "• GW{}: {} pts (avg: {}) {}",
            gw.display_field("event"),
            pts,
            avg,
            mark
        ));
    }
    lines.join("\n")
}

pub async fn get_team_value_breakdown(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<TeamIdParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    match render_value_breakdown(ctx, params.manager()).await {
        Ok(text) => text,
        Err(err) => failure("fetching value breakdown", &err),
    }
}

struct SquadPlayer {
    name: String,
    club: String,
    value: f64,
    points: i64,
}

async fn render_value_breakdown(ctx: &FplContext, manager: ManagerId) -> Result<String> {
    let gameweek = gameweek_or_current(ctx, None).await?;
    let selection = ctx.managers.picks(manager, gameweek).await?;
    let picks = selection.records("picks");
    if picks.is_empty() {
        return Ok(format!("No team data found for Team ID {manager}"));
    }
    let lookups = Lookups::load(ctx).await?;

    let mut by_position: HashMap<Position, Vec<SquadPlayer>> = HashMap::new();
    for pick in &picks {
        let Some(player) = lookups.player(pick.i64_field("element")) else {
            continue;
        };
        let Some(position) = Position::from_element_type(player.i64_field("element_type")) else {
            continue;
        };
        by_position.entry(position).or_default().push(SquadPlayer {
            name: player.display_name(),
            club: lookups.club(player),
            value: player.price(),
            points: player.i64_field("total_points"),
        });
    }

    let squad_value: f64 = by_position.values().flatten().map(|p| p.value).sum();
    let bank = to_millions(selection.record("entry_history").i64_field("bank"));

    let mut lines = vec![
        "💰 **Team Value Breakdown**".to_string(),
        String::new(),
        "**Overall:**".to_string(),
        format!("• Squad Value: {}", money(squad_value)),
        format!("• In Bank: {}", money(bank)),
        format!("• Total Budget: {}", money(squad_value + bank)),
        String::new(),
    ];

    for position in Position::ALL {
        let Some(players) = by_position.get_mut(&position) else {
            continue;
        };
        players.sort_by(|a, b| b.value.total_cmp(&a.value));
        let total: f64 = players.iter().map(|p| p.value).sum();
        let points: i64 = players.iter().map(|p| p.points).sum();
        let share = if squad_value > 0.0 { total / squad_value * 100.0 } else { 0.0 };

        lines.push(format!(
            "{} **{}** ({} players):",
            position_emoji(position),
            position.plural(),
            players.len()
        ));
        lines.push(format!("• Total Value: {} ({share:.1}%)", money(total)));
        lines.push(format!("• Total Points: {points} pts"));
        lines.push(format!(
            "• Avg Value: {} per player",
            money(total / players.len() as f64)
        ));
        lines.push("• Players:".to_string());
        for p in players.iter() {
            lines.push(format!(
                "  - {} ({}): {}, {} pts",
                p.name,
                p.club,
                money(p.value),
                p.points
            ));
        }
        lines.push(String::new());
    }

    let mut squad: Vec<&SquadPlayer> = by_position.values().flatten().collect();
    squad.sort_by(|a, b| b.value.total_cmp(&a.value));

    lines.push("**💎 Most Expensive Players:**".to_string());
    for (i, p) in squad.iter().take(3).enumerate() {
        lines.push(format!("{}. {} - {}", i + 1, p.name, money(p.value)));
    }
    lines.push(String::new());
    lines.push("**💵 Budget Players:**".to_string());
    for (i, p) in squad.iter().rev().take(3).enumerate() {
        lines.push(format!(
            "{}. {} - {} ({} pts)",
            i + 1,
            p.name,
            money(p.value),
            p.points
        ));
    }
    Ok(lines.join("\n"))
}
