use bevy_math::{ivec2, vec2};
use maze_nav::{MazeEngine, MazeGrid, PASSAGE};

const AREA: f32 = 300.;

fn main() {
    // A fully open 3x3 logical maze, in doubled form:
    //
    //   0 0 0 0 0 0
    //   0 0 0 0 0 0
    //   0 0 0 0 0 0
    //   0 0 0 0 0 0
    //   0 0 0 0 0 0
    //   0 0 0 0 0 0
    let grid = MazeGrid::from_rows(vec![vec![PASSAGE; 6]; 6]);

    let mut engine = MazeEngine::new();
    engine.set_maze(grid);

    // Click the top-left and bottom-right logical cells on a 300x300 view.
    let ratio = AREA / 3.;
    engine
        .set_start(vec2(0.5 * ratio, 0.5 * ratio), ratio, ratio)
        .expect("open maze is connected");
    engine
        .set_end(vec2(2.5 * ratio, 2.5 * ratio), ratio, ratio)
        .expect("open maze is connected");

    println!("A* path (doubled, end-first): {:?}", engine.path());

    let result = engine.q_find(ivec2(2, 2), ivec2(0, 0));
    println!("Q-Learning result: ok={} {:?}", result.ok, result.message);
    println!("Q path (doubled, end-first): {:?}", engine.path());

    let config = engine.render(vec2(AREA, AREA));
    println!("markers: {:?}", config.points);
    println!("segments: {}", config.path.len());
}
