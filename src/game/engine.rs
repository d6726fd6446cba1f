use super::{
    config::GameConfig,
    direction::Direction,
    fruit::FruitKind,
    speed::SpeedRamp,
    state::{CollisionType, GameState, Position, Snake, StepOutcome},
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the round has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// What one call to [`GameEngine::advance_progress`] did
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceResult {
    /// Leftover fraction of a step, in [0, 1)
    pub progress: f64,
    /// Discrete steps taken
    pub steps: u32,
    /// Foods eaten along the way
    pub foods_eaten: u32,
    /// Set if a step collided and ended the round
    pub collision: Option<CollisionType>,
}

impl AdvanceResult {
    pub fn died(&self) -> bool {
        self.collision.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    ramp: SpeedRamp,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            ramp: config.speed_ramp(),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh round
    pub fn reset(&mut self) -> GameState {
        let start_x = (self.config.grid_width / 3) as i32;
        let start_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(start_x, start_y),
            Direction::Right,
            self.config.initial_length,
        );

        // A snake filling the whole board has nowhere to put food; leave it
        // under the head so the next step ends the round.
        let food = self.spawn_food_avoid_snake(&snake).unwrap_or(snake.head());

        let mut state = GameState::new(
            snake,
            food,
            self.config.grid_width,
            self.config.grid_height,
            self.ramp.base,
        );
        state.fruit = FruitKind::random(&mut self.rng);

        info!(
            width = state.grid_width,
            height = state.grid_height,
            length = state.snake.len(),
            "round started"
        );

        state
    }

    /// Accumulate `elapsed_secs * speed` cells of travel and take one step
    /// for every whole cell. Stops at the first collision.
    pub fn advance_progress(
        &mut self,
        state: &mut GameState,
        elapsed_secs: f64,
        speed: f64,
    ) -> AdvanceResult {
        let mut result = AdvanceResult {
            progress: state.progress,
            steps: 0,
            foods_eaten: 0,
            collision: None,
        };

        if !state.is_running() || !(elapsed_secs.is_finite() && elapsed_secs > 0.0) {
            return result;
        }
        if !(speed.is_finite() && speed > 0.0) {
            return result;
        }

        let travel = speed * elapsed_secs;
        if !travel.is_finite() {
            return result;
        }

        state.progress += travel;

        while state.progress >= 1.0 {
            state.progress -= 1.0;

            let step = self.step(state);
            if let Some(collision) = step.info.collision_type {
                // A long frame may leave whole steps unspent
                state.progress = state.progress.fract();
                result.collision = Some(collision);
                break;
            }

            result.steps += 1;
            if step.info.ate_food {
                result.foods_eaten += 1;
            }
        }

        result.progress = state.progress;
        result
    }

    /// Execute one discrete step, then eat if the head landed on food
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                },
            };
        }

        let new_head = match state.step() {
            StepOutcome::Moved(head) => head,
            StepOutcome::Collided(collision_type) => {
                info!(
                    ?collision_type,
                    score = state.score,
                    length = state.snake.len(),
                    "round over"
                );
                return StepResult {
                    terminated: true,
                    info: StepInfo {
                        ate_food: false,
                        collision_type: Some(collision_type),
                    },
                };
            }
        };

        let ate_food = new_head == state.food;
        if ate_food {
            self.eat(state);
        }

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Grow, score, speed up and move the food elsewhere
    fn eat(&mut self, state: &mut GameState) {
        state.snake.eat();
        state.score += 1;
        state.speed = self.ramp.next(state.speed);

        if let Some(food) = self.spawn_food_avoid_snake(&state.snake) {
            state.food = food;
            state.fruit = FruitKind::random(&mut self.rng);
        }

        debug!(
            score = state.score,
            speed = state.speed,
            food_x = state.food.x,
            food_y = state.food.y,
            fruit = state.fruit.name(),
            "food eaten"
        );
    }

    /// Spawn food at a random cell the snake does not cover.
    ///
    /// Rejection sampling is tried once per grid cell; after that the free
    /// cells are listed and one is chosen directly. `None` means the board
    /// is full.
    pub fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Position> {
        let width = self.config.grid_width;
        let height = self.config.grid_height;
        let attempts = width * height;

        for _ in 0..attempts {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        let occupied: HashSet<Position> = snake.body().iter().copied().collect();
        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !occupied.contains(pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}
