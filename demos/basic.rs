use snapshot_planner::{to_motor_protocol, translate, CellState, Heading, Obstacle, PlannerConfig};

fn main() {
    env_logger::init();

    let config = PlannerConfig::default();
    let start = CellState::new(1, 1, Heading::North.code()).unwrap();
    let obstacles = vec![
        Obstacle::new(5, 10, Heading::East.code(), 1).unwrap(),
        Obstacle::new(5, 15, Heading::East.code(), 2).unwrap(),
        Obstacle::new(14, 14, Heading::North.code(), 3).unwrap(),
    ];

    let outcome = snapshot_planner::solve(&config, start, obstacles.clone(), false)
        .expect("a 20x20 grid always accepts this input");

    if !outcome.feasible {
        println!("no feasible plan: {:?}", outcome.diagnostic);
        return;
    }

    println!(
        "visited {} obstacle(s) at cost {}: {:?}",
        outcome.visited_obstacle_ids.len(),
        outcome.cost,
        outcome.visited_obstacle_ids
    );

    let tokens = translate(&outcome.states, &obstacles).expect("assembler only emits valid transitions");
    let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    println!("primary grammar: {}", rendered.join(" "));
    println!("motor protocol:  {}", to_motor_protocol(&tokens));
}
