//! Player search, detail, comparison and position rankings.

use tracing::warn;

use super::{
    failure,
    format::{index_by_id, last_n, money, position_name, team_name},
    input::{
        parse_tool_input, BestPlayersParams, PlayerComparisonParams, PlayerSearchParams,
        PlayerStatsParams, ToolInput,
    },
};
use crate::fpl::{players::PlayerApi, FplContext, Position, Record};

const SEARCH_LIMIT: usize = 5;
const RECENT_GAMEWEEKS: usize = 5;
const UPCOMING_FIXTURES: usize = 5;
const RANKING_LIMIT: usize = 10;

pub async fn search_player_by_name(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<PlayerSearchParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    let players = match ctx.bootstrap.players_by_name(&params.name).await {
        Ok(players) => players,
        Err(err) => return failure("searching for players", &err),
    };
    if players.is_empty() {
        return format!("No players found matching '{}'", params.name);
    }
    let teams = index_by_id(ctx.bootstrap.teams().await.unwrap_or_default());

    let mut lines = vec![
        format!("Found {} player(s) matching '{}':", players.len(), params.name),
        String::new(),
    ];
    for p in players.iter().take(SEARCH_LIMIT) {
        lines.push(format!("• {}", p.display_name()));
        lines.push(format!(
            "  ID: {}, Team: {}, Position: {}",
            p.id(),
            team_name(&teams, p.i64_field("team")),
            position_name(p.i64_field("element_type"))
        ));
        lines.push(format!(
            "  Price: {}, Points: {}",
            money(p.price()),
            p.i64_field("total_points")
        ));
        lines.push(format!(
            "  Form: {}, Selected by: {}%",
            p.display_field("form"),
            p.display_field("selected_by_percent")
        ));
        lines.push(String::new());
    }
    if players.len() > SEARCH_LIMIT {
        lines.push(format!(
            "…and {} more. Try a more specific name.",
            players.len() - SEARCH_LIMIT
        ));
    }
    lines.join("\n")
}

pub async fn get_player_detailed_stats(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<PlayerStatsParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    let player = match ctx.bootstrap.players_by_name(&params.player_name).await {
        Ok(found) => match found.into_iter().next() {
            Some(player) => player,
            None => return format!("Player '{}' not found", params.player_name),
        },
        Err(err) => return failure("fetching player stats", &err),
    };
    let teams = index_by_id(ctx.bootstrap.teams().await.unwrap_or_default());

    // the detail endpoint is optional; render what bootstrap has if it fails
    let (history, fixtures) = match ctx.players.summary(player.id()).await {
        Ok(summary) => (summary.records("history"), summary.records("fixtures")),
        Err(err) => {
            warn!(player_id = player.id(), error = %err, "player summary unavailable");
            (Vec::new(), Vec::new())
        }
    };
    let history = last_n(&history, RECENT_GAMEWEEKS);
    let fixtures = &fixtures[..fixtures.len().min(UPCOMING_FIXTURES)];

    let mut lines = vec![
        format!("📊 **{}** - Detailed Analysis", player.display_name()),
        String::new(),
        "**Basic Info:**".to_string(),
        format!("• Position: {}", position_name(player.i64_field("element_type"))),
        format!("• Team: {}", team_name(&teams, player.i64_field("team"))),
        format!("• Price: {}", money(player.price())),
        format!("• Ownership: {}%", player.display_field("selected_by_percent")),
    ];
    let photo = PlayerApi::photo_url(&player);
    if !photo.is_empty() {
        lines.push(format!("• Photo: {photo}"));
    }
    lines.extend([
        String::new(),
        "**Season Performance:**".to_string(),
        format!("• Total Points: {}", player.i64_field("total_points")),
        format!("• Points per Game: {}", player.display_field("points_per_game")),
        format!("• Form: {}", player.display_field("form")),
        format!("• Goals: {}", player.i64_field("goals_scored")),
        format!("• Assists: {}", player.i64_field("assists")),
        format!("• Clean Sheets: {}", player.i64_field("clean_sheets")),
        String::new(),
    ]);

    if !history.is_empty() {
        let points: i64 = history.iter().map(|h| h.i64_field("total_points")).sum();
        let minutes: i64 = history.iter().map(|h| h.i64_field("minutes")).sum();
        lines.push(format!("**Recent Form (Last {} GWs):**", history.len()));
        lines.push(format!(
            "• Points: {} ({:.1} avg)",
            points,
            points as f64 / history.len() as f64
        ));
        lines.push(format!("• Minutes: {minutes}"));
        lines.push(String::new());
    }

    if !fixtures.is_empty() {
        lines.push(format!("**Next {} Fixtures:**", fixtures.len()));
        for f in fixtures {
            let difficulty = f.opt_i64("difficulty").unwrap_or(3);
            lines.push(format!(
                "• GW{}: Difficulty {}/5",
                f.display_field("event"),
                difficulty
            ));
        }
        lines.push(String::new());
    }

    lines.push("**Value Metrics:**".to_string());
    lines.push(format!("• Points per £1m: {:.1}", player.points_per_million()));
    lines.push(format!("• ICT Index: {}", player.display_field("ict_index")));
    lines.join("\n")
}

pub async fn compare_two_players(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<PlayerComparisonParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    let first = match ctx.bootstrap.players_by_name(&params.player1_name).await {
        Ok(found) => found.into_iter().next(),
        Err(err) => return failure("comparing players", &err),
    };
    let second = match ctx.bootstrap.players_by_name(&params.player2_name).await {
        Ok(found) => found.into_iter().next(),
        Err(err) => return failure("comparing players", &err),
    };
    let (p1, p2) = match (first, second) {
        (None, _) => return format!("Player '{}' not found", params.player1_name),
        (_, None) => return format!("Player '{}' not found", params.player2_name),
        (Some(p1), Some(p2)) => (p1, p2),
    };
    let (name1, name2) = (p1.display_name(), p2.display_name());

    let metrics: [(&str, fn(&Record) -> String); 8] = [
        ("Price", |p| money(p.price())),
        ("Total Points", |p| p.i64_field("total_points").to_string()),
        ("Points/Game", |p| p.display_field("points_per_game")),
        ("Form", |p| p.display_field("form")),
        ("Ownership", |p| format!("{}%", p.display_field("selected_by_percent"))),
        ("Goals", |p| p.i64_field("goals_scored").to_string()),
        ("Assists", |p| p.i64_field("assists").to_string()),
        ("Clean Sheets", |p| p.i64_field("clean_sheets").to_string()),
    ];

    let mut lines = vec![
        format!("⚖️ **Player Comparison: {name1} vs {name2}**"),
        String::new(),
    ];
    for (metric, read) in metrics {
        lines.push(format!("**{metric}:**"));
        lines.push(format!("  {name1}: {}", read(&p1)));
        lines.push(format!("  {name2}: {}", read(&p2)));
        lines.push(String::new());
    }
    lines.push("**Value Analysis:**".to_string());
    lines.push(format!("  {name1}: {:.1} pts/£m", p1.points_per_million()));
    lines.push(format!("  {name2}: {:.1} pts/£m", p2.points_per_million()));
    lines.join("\n")
}

/// Players of `position` inside the price band with enough minutes, best
/// points per million first.
pub fn rank_by_value(
    players: &[Record],
    position: Position,
    min_price: f64,
    max_price: f64,
    min_minutes: i64,
) -> Vec<Record> {
    let mut qualifying: Vec<Record> = players
        .iter()
        .filter(|p| p.i64_field("element_type") == position.element_type())
        .filter(|p| (min_price..=max_price).contains(&p.price()))
        .filter(|p| p.i64_field("minutes") >= min_minutes)
        .cloned()
        .collect();
    qualifying.sort_by(|a, b| b.points_per_million().total_cmp(&a.points_per_million()));
    qualifying
}

pub async fn find_best_players_by_position(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<BestPlayersParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    let position: Position = match params.position.parse() {
        Ok(position) => position,
        Err(err) => return format!("❌ {err}"),
    };
    let players = match ctx.bootstrap.players().await {
        Ok(players) => players,
        Err(err) => return failure("finding players", &err),
    };

    let ranked = rank_by_value(
        &players,
        position,
        params.min_price,
        params.max_price,
        params.min_minutes,
    );
    let band = if params.min_price > 0.0 {
        format!(
            "between {} and {}",
            money(params.min_price),
            money(params.max_price)
        )
    } else {
        format!("under {}", money(params.max_price))
    };
    if ranked.is_empty() {
        return format!(
            "No {} found {} with at least {} minutes played.",
            position.plural(),
            band,
            params.min_minutes
        );
    }

    let mut lines = vec![
        format!("🎯 **Top {} {}**", position.plural(), band),
        String::new(),
    ];
    for (rank, p) in ranked.iter().take(RANKING_LIMIT).enumerate() {
        lines.push(format!(
            "{}. **{}** ({})",
            rank + 1,
            p.display_name(),
            money(p.price())
        ));
        lines.push(format!(
            "   Points: {} | PPM: {:.1} | Form: {}",
            p.i64_field("total_points"),
            p.points_per_million(),
            p.display_field("form")
        ));
        lines.push(format!(
            "   Ownership: {}% | Mins: {}",
            p.display_field("selected_by_percent"),
            p.i64_field("minutes")
        ));
        lines.push(String::new());
    }
    if ranked.len() > RANKING_LIMIT {
        lines.push(format!(
            "…and {} more players qualify",
            ranked.len() - RANKING_LIMIT
        ));
    }
    lines.join("\n")
}
