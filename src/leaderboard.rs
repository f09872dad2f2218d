pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: &'static str,
    pub stars: u32,
    pub levels: u32,
}

/// Static mock data; there is no backend.
pub fn mock_leaderboard() -> Vec<LeaderboardEntry> {
    let rows = [
        ("ProGamer2024", 150, 50),
        ("KeyMaster", 145, 48),
        ("SpeedRunner", 142, 47),
        ("PuzzleSolver", 138, 46),
        ("NightHawk", 135, 45),
        ("ShadowWalker", 130, 43),
        ("StarCollector", 128, 42),
        ("MapExplorer", 125, 41),
        ("QuickFinish", 120, 40),
        ("BrainTeaser", 115, 38),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, &(username, stars, levels))| LeaderboardEntry {
            rank: i as u32 + 1,
            username,
            stars,
            levels,
        })
        .collect()
}

pub fn rank_label(rank: u32) -> String {
    match rank {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("#{n}"),
    }
}
