use super::direction::Direction;
use super::fruit::FruitKind;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// How one body segment moved during the last step.
///
/// A segment that only exists because the snake grew has no earlier
/// position to slide from, so it is drawn fixed in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMotion {
    Sliding { from: Position, to: Position },
    Fresh(Position),
}

impl SegmentMotion {
    /// Linear interpolation at fraction `t`, clamped to [0, 1]
    pub fn at(&self, t: f64) -> (f64, f64) {
        match *self {
            SegmentMotion::Sliding { from, to } => {
                let t = t.clamp(0.0, 1.0);
                (
                    (1.0 - t) * from.x as f64 + t * to.x as f64,
                    (1.0 - t) * from.y as f64 + t * to.y as f64,
                )
            }
            SegmentMotion::Fresh(at) => (at.x as f64, at.y as f64),
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Body as it was before the last step, for interpolation
    previous: Vec<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Steps left that keep the tail in place
    pending_growth: u32,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        // Initial segments trail behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self::from_body(body, direction)
    }

    /// Build a snake from explicit segments, head first
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty: every snake has a head.
    pub fn from_body(body: Vec<Position>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "snake body must have a head");
        Self {
            previous: body.clone(),
            body,
            direction,
            pending_growth: 0,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn previous(&self) -> &[Position] {
        &self.previous
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Change heading unless it would reverse the snake onto itself.
    /// Returns whether the new direction was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Queue one segment of growth for the next step
    pub fn eat(&mut self) {
        self.pending_growth += 1;
    }

    /// Check if any segment, tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend `new_head`, keeping the tail if growth is pending
    fn advance_to(&mut self, new_head: Position) {
        self.previous.clone_from(&self.body);
        self.body.insert(0, new_head);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop();
        }
    }

    /// Motion of segment `index` over the last step
    pub fn segment_motion(&self, index: usize) -> Option<SegmentMotion> {
        let to = *self.body.get(index)?;
        Some(match self.previous.get(index) {
            Some(&from) => SegmentMotion::Sliding { from, to },
            None => SegmentMotion::Fresh(to),
        })
    }

    /// Position of segment `index` at fraction `t` of the way through the last step
    pub fn interpolated_position(&self, index: usize, t: f64) -> Option<(f64, f64)> {
        self.segment_motion(index).map(|motion| motion.at(t))
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Result of one discrete step of the body
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The head advanced to this cell
    Moved(Position),
    /// The move was refused and the round is over
    Collided(CollisionType),
}

/// Complete game state for one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub fruit: FruitKind,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    /// Current speed in cells per second
    pub speed: f64,
    /// Fraction of the way to the next step, in [0, 1)
    pub progress: f64,
    pub is_alive: bool,
    pub is_paused: bool,
    /// What ended the round, once it has ended
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        food: Position,
        grid_width: usize,
        grid_height: usize,
        speed: f64,
    ) -> Self {
        Self {
            snake,
            food,
            fruit: FruitKind::Apple,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            speed,
            progress: 0.0,
            is_alive: true,
            is_paused: false,
            collision: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Whether the clock should be advancing this round
    pub fn is_running(&self) -> bool {
        self.is_alive && !self.is_paused
    }

    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.snake.set_direction(direction)
    }

    /// Flip the pause flag of a live round. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.is_alive {
            self.is_paused = !self.is_paused;
        }
        self.is_paused
    }

    /// Check if the new head position causes a collision
    pub fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Advance the snake one cell. On collision the body is left as it was
    /// and the round is marked over.
    pub fn step(&mut self) -> StepOutcome {
        let new_head = self.snake.head().moved_in_direction(self.snake.direction());

        if let Some(collision) = self.check_collision(new_head) {
            self.is_alive = false;
            self.collision = Some(collision);
            return StepOutcome::Collided(collision);
        }

        self.snake.advance_to(new_head);
        self.steps += 1;
        StepOutcome::Moved(new_head)
    }
}
