//! Ouitanks headless runner
//!
//! Loads a level and tuning, then drives the simulation with a scripted
//! control sequence through the same fixed-step loop a front end would use.
//!
//! Usage: `ouitanks [LEVEL_FILE] [TUNING_JSON]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use ouitanks::Tuning;
    use ouitanks::consts::*;
    use ouitanks::sim::{GameEvent, Level, TankControl, World, debug_shapes, tick};

    const BUILTIN_LEVEL: &str = include_str!("../levels/arena.txt");

    /// Display refresh the runner pretends to be driven by
    const FRAME_TIME: f32 = 1.0 / 45.0;
    const RUN_SECONDS: f32 = 8.0;

    /// (simulation step, tank index, control message)
    const SCRIPT: &[(u64, usize, &str)] = &[
        (0, 0, "MOV_F 1"),
        (0, 1, "AIM -8.5 0 -0.5"),
        (30, 0, "MOV_F 0"),
        (30, 1, "SHOT"),
        (45, 0, "ROT_L 1"),
        (75, 0, "ROT_L 0"),
        (80, 0, "MINE"),
        (90, 0, "MOV_B 1"),
        (150, 0, "MOV_B 0"),
        (160, 1, "ROT_R 1"),
        (190, 1, "ROT_R 0"),
        (200, 1, "MOV_F 1"),
        (260, 1, "SHOT"),
        (261, 1, "bogus"),
        (320, 1, "MOV_F 0"),
    ];

    /// Game instance holding all state
    struct Runner {
        world: World,
        controls: Vec<TankControl>,
        accumulator: f32,
        steps: u64,
        script: std::iter::Peekable<std::slice::Iter<'static, (u64, usize, &'static str)>>,
    }

    impl Runner {
        fn new(mut world: World, level: &Level) -> Self {
            let controls = world
                .load_level(level)
                .into_iter()
                .map(TankControl::new)
                .collect();
            Self {
                world,
                controls,
                accumulator: 0.0,
                steps: 0,
                script: SCRIPT.iter().peekable(),
            }
        }

        fn feed_script(&mut self) {
            while let Some(&&(step, tank, message)) = self.script.peek() {
                if step > self.steps {
                    break;
                }
                self.script.next();
                match self.controls.get_mut(tank) {
                    Some(control) => {
                        control.input.apply_message(message);
                    }
                    None => log::warn!("script addresses missing tank #{tank}"),
                }
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.feed_script();
                let report = tick(&mut self.world, &self.controls, SIM_DT);
                self.accumulator -= SIM_DT;
                self.steps += 1;
                substeps += 1;

                // Clear one-shot inputs after processing
                for control in &mut self.controls {
                    control.input.clear_triggers();
                }

                if !report.is_empty() {
                    let hits = debug_shapes(&self.world, &report)
                        .iter()
                        .filter(|shape| shape.hit)
                        .count();
                    log::trace!("step {}: {} colliders in contact", self.steps, hits);
                }
            }

            for event in self.world.drain_events() {
                log_event(self.steps, &event);
            }
        }
    }

    fn log_event(step: u64, event: &GameEvent) {
        match event {
            GameEvent::ActorSpawned { .. } | GameEvent::ActorDestroyed { .. } => {
                log::debug!("step {step}: {event:?}")
            }
            GameEvent::BulletBounced { id, position } => {
                log::info!("step {step}: bullet {id:?} bounced at {position}")
            }
            GameEvent::ExplosionSpawned { id, position } => {
                log::info!("step {step}: explosion {id:?} at {position}")
            }
        }
    }

    fn load_level(path: Option<&str>) -> Level {
        let text = match path {
            Some(path) => match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    log::error!("cannot read level {path}: {e}; using built-in arena");
                    BUILTIN_LEVEL.to_string()
                }
            },
            None => BUILTIN_LEVEL.to_string(),
        };
        let (level, issues) = Level::parse(&text);
        if !issues.is_empty() {
            log::warn!("level loaded with {} issue(s)", issues.len());
        }
        level
    }

    pub fn run() {
        env_logger::init();
        log::info!("Ouitanks (headless) starting...");

        let args: Vec<String> = std::env::args().skip(1).collect();
        let level = load_level(args.first().map(String::as_str));
        let tuning = match args.get(1) {
            Some(path) => Tuning::load_or_default(path),
            None => Tuning::default(),
        };

        let mut runner = Runner::new(World::new(tuning), &level);
        if runner.controls.is_empty() {
            log::warn!("level has no player spawn; nothing to drive");
        }

        let frames = (RUN_SECONDS / FRAME_TIME) as u32;
        for _ in 0..frames {
            runner.update(FRAME_TIME);
        }

        log::info!(
            "Finished after {} steps with {} live actors",
            runner.steps,
            runner.world.len()
        );
        match serde_json::to_string_pretty(&runner.world.snapshots()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("failed to serialize snapshots: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Front ends embed the library directly; there is no wasm runner
}
