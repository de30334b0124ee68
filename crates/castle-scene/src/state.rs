//! Simulation state and the per-tick update.

use castle_core::Result;
use castle_geometry::ClosedSpline;
use castle_math::{Point3, DVec3};
use log::{debug, info};
use slotmap::SlotMap;

use crate::camera::{Camera, CameraPreset};
use crate::collision::{check_collision, Obstacles};
use crate::config::SceneConfig;
use crate::input::{Control, InputEvent, Key, Keyboard};
use crate::object::{CurveFollower, FrameAnimation, ObjectKey, ObjectKind, Placement, SceneObject};
use crate::picking::{pick_along_ray, Interactable, PickTarget};

/// Game flags toggled by input and scripted events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameState {
    pub window_width: u32,
    pub window_height: u32,
    pub elapsed_time: f64,
    pub last_update_time: f64,
    pub game_over: bool,
    pub fog: bool,
    pub wand_grabbed: bool,
    pub banner_on: bool,
    /// Growth spell cast, waiting for the next tick to apply
    pub engorgio: bool,
    /// Growth spell counts toward finishing the game
    pub engorgio_final: bool,
    /// Door opened
    pub alohomora: bool,
    pub cauldron_enlarged: bool,
}

impl GameState {
    pub fn aspect_ratio(&self) -> f64 {
        self.window_width as f64 / self.window_height.max(1) as f64
    }

    fn all_tasks_done(&self) -> bool {
        self.wand_grabbed && self.engorgio_final && self.alohomora
    }
}

/// Arena keys of the scene's well-known objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHandles {
    pub broom: ObjectKey,
    pub cauldron: ObjectKey,
    pub castle: ObjectKey,
    pub wand: ObjectKey,
    pub table: ObjectKey,
    pub door: ObjectKey,
    pub opened_door: ObjectKey,
    pub ground: ObjectKey,
    pub tree: ObjectKey,
    pub banner: ObjectKey,
    pub animated_banner: ObjectKey,
    pub flame: ObjectKey,
}

impl SceneHandles {
    pub fn get(&self, kind: ObjectKind) -> ObjectKey {
        match kind {
            ObjectKind::Broom => self.broom,
            ObjectKind::Cauldron => self.cauldron,
            ObjectKind::Castle => self.castle,
            ObjectKind::Wand => self.wand,
            ObjectKind::Table => self.table,
            ObjectKind::Door => self.door,
            ObjectKind::OpenedDoor => self.opened_door,
            ObjectKind::Ground => self.ground,
            ObjectKind::Tree => self.tree,
            ObjectKind::Banner => self.banner,
            ObjectKind::AnimatedBanner => self.animated_banner,
            ObjectKind::Flame => self.flame,
        }
    }
}

/// Create every scene object with its initial placement and clock.
fn spawn_objects(config: &SceneConfig, now: f64) -> (SlotMap<ObjectKey, SceneObject>, SceneHandles) {
    let mut objects = SlotMap::with_key();
    let props = &config.props;
    let mut prop = |kind, placement| objects.insert(SceneObject::new(kind, placement, now));

    let cauldron = prop(ObjectKind::Cauldron, Placement::from(&props.cauldron));
    let castle = prop(ObjectKind::Castle, Placement::from(&props.castle));
    let wand = prop(ObjectKind::Wand, Placement::from(&props.wand));
    let table = prop(ObjectKind::Table, Placement::from(&props.table));
    let door = prop(ObjectKind::Door, Placement::from(&props.door));
    let opened_door = prop(ObjectKind::OpenedDoor, Placement::from(&props.opened_door));
    let ground = prop(ObjectKind::Ground, Placement::from(&props.ground));
    let tree = prop(ObjectKind::Tree, Placement::from(&props.tree));
    let banner = prop(ObjectKind::Banner, Placement::from(&props.banner));
    let animated_banner = prop(ObjectKind::AnimatedBanner, Placement::from(&props.animated_banner));

    let broom_cfg = &config.broom;
    let broom = objects.insert(
        SceneObject::new(
            ObjectKind::Broom,
            Placement {
                position: broom_cfg.position,
                direction: broom_cfg.direction,
                size: broom_cfg.size,
            },
            now,
        )
        .with_follower(CurveFollower {
            base_position: broom_cfg.position,
            speed: broom_cfg.speed,
        }),
    );

    let flame_cfg = &config.flame;
    let flame = objects.insert(
        SceneObject::new(
            ObjectKind::Flame,
            Placement {
                position: flame_cfg.position,
                direction: flame_cfg.direction,
                size: flame_cfg.size,
            },
            now,
        )
        .with_animation(FrameAnimation {
            frames: flame_cfg.frames,
            frame_duration: flame_cfg.frame_duration,
        }),
    );

    let handles = SceneHandles {
        broom,
        cauldron,
        castle,
        wand,
        table,
        door,
        opened_door,
        ground,
        tree,
        banner,
        animated_banner,
        flame,
    };
    (objects, handles)
}

/// Everything the scene needs between ticks.
///
/// Driven by a single-threaded loop: feed input through
/// [`handle_input`](Self::handle_input), call [`update`](Self::update) with
/// the current time, then hand [`render_frame`](Self::render_frame) to the
/// renderer.
#[derive(Debug)]
pub struct SimulationState {
    config: SceneConfig,
    spline: ClosedSpline,
    pub game: GameState,
    pub camera: Camera,
    pub keyboard: Keyboard,
    objects: SlotMap<ObjectKey, SceneObject>,
    handles: SceneHandles,
}

impl SimulationState {
    /// Build the scene from `config` and start the game at time `now`.
    pub fn new(config: SceneConfig, now: f64) -> Result<Self> {
        let spline = ClosedSpline::new(config.broom.control_points.clone())?;
        let (objects, handles) = spawn_objects(&config, now);
        info!(
            "scene ready: {} objects, {} control points",
            objects.len(),
            spline.len()
        );
        Ok(Self {
            camera: Camera::new(config.camera.clone(), now),
            game: GameState {
                window_width: config.window.width,
                window_height: config.window.height,
                elapsed_time: now,
                last_update_time: now,
                ..GameState::default()
            },
            keyboard: Keyboard::default(),
            config,
            spline,
            objects,
            handles,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn spline(&self) -> &ClosedSpline {
        &self.spline
    }

    pub fn object(&self, kind: ObjectKind) -> &SceneObject {
        &self.objects[self.handles.get(kind)]
    }

    fn object_mut(&mut self, kind: ObjectKind) -> &mut SceneObject {
        &mut self.objects[self.handles.get(kind)]
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    /// Reset flags, camera and objects to their initial state.
    pub fn restart(&mut self, now: f64) {
        info!("restarting scene at t={:.3}", now);
        self.game = GameState {
            window_width: self.game.window_width,
            window_height: self.game.window_height,
            elapsed_time: now,
            last_update_time: now,
            ..GameState::default()
        };
        self.keyboard = Keyboard::default();
        self.camera = Camera::new(self.config.camera.clone(), now);
        let (objects, handles) = spawn_objects(&self.config, now);
        self.objects = objects;
        self.handles = handles;
    }

    /// Apply one input event.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<Control> {
        match event {
            InputEvent::KeyDown(Key::Escape) => return Ok(Control::Quit),
            InputEvent::KeyDown(Key::Char(c)) => self.handle_char(c),
            InputEvent::KeyDown(key) | InputEvent::KeyUp(key) if self.game.game_over => {
                debug!("ignoring {:?} after game over", key);
            }
            InputEvent::KeyDown(Key::F1) => self.camera.apply_preset(CameraPreset::StaticFirst),
            InputEvent::KeyDown(Key::F2) => self.camera.apply_preset(CameraPreset::StaticSecond),
            InputEvent::KeyDown(Key::F3) => self.camera.apply_preset(CameraPreset::Free),
            InputEvent::KeyDown(key) => self.keyboard.set(key, true),
            InputEvent::KeyUp(key) => self.keyboard.set(key, false),
            InputEvent::MouseMotion { dx, dy } => {
                if !self.game.game_over {
                    self.camera.look(dx, dy)?;
                }
            }
            InputEvent::Click(target) => self.click(target),
            InputEvent::ClickCrosshair => {
                let target = self.pick_crosshair();
                self.click(target);
            }
            InputEvent::Resize { width, height } => {
                self.game.window_width = width;
                self.game.window_height = height;
            }
        }
        Ok(Control::Continue)
    }

    fn handle_char(&mut self, c: char) {
        match c {
            'r' => self.restart(self.game.elapsed_time),
            'c' => {
                let p = self.camera.position;
                info!("camera position: {:.3}, {:.3}, {:.3}", p.x, p.y, p.z);
            }
            'g' => {
                self.game.fog = !self.game.fog;
                debug!("fog {}", if self.game.fog { "on" } else { "off" });
            }
            'l' => {
                self.camera.spotlight_on = !self.camera.spotlight_on;
                debug!("spotlight {}", if self.camera.spotlight_on { "on" } else { "off" });
            }
            _ => {}
        }
    }

    /// Bounding spheres of the objects a click can hit right now.
    pub fn pick_targets(&self) -> Vec<PickTarget> {
        let mut targets = Vec::with_capacity(3);
        if !self.game.wand_grabbed {
            let wand = self.object(ObjectKind::Wand).placement;
            targets.push(PickTarget {
                target: Interactable::Wand,
                center: wand.position,
                radius: wand.size,
            });
        }
        let cauldron = self.object(ObjectKind::Cauldron).placement;
        targets.push(PickTarget {
            target: Interactable::Cauldron,
            center: cauldron.position,
            radius: cauldron.size,
        });
        let door_kind = if self.game.alohomora {
            ObjectKind::OpenedDoor
        } else {
            ObjectKind::Door
        };
        let door = self.object(door_kind).placement;
        targets.push(PickTarget {
            target: Interactable::Door,
            center: door.position,
            radius: door.size,
        });
        targets
    }

    /// Object under the crosshair, found by ray casting.
    pub fn pick_crosshair(&self) -> Option<Interactable> {
        pick_along_ray(&self.camera.view_ray(), &self.pick_targets())
    }

    fn distance_to(&self, kind: ObjectKind) -> f64 {
        self.camera.position.distance(self.object(kind).placement.position)
    }

    /// Trigger the scripted event for a clicked object, if in reach.
    pub fn click(&mut self, target: Option<Interactable>) {
        let reach = &self.config.interaction;
        match target {
            Some(Interactable::Wand) => {
                if !self.game.wand_grabbed && self.distance_to(ObjectKind::Wand) < reach.wand_reach {
                    info!("wand picked up");
                    self.game.wand_grabbed = true;
                    self.game.banner_on = true;
                }
            }
            Some(Interactable::Cauldron) => {
                if self.game.wand_grabbed && self.distance_to(ObjectKind::Cauldron) < reach.spell_reach {
                    info!("growth spell cast on the cauldron");
                    self.game.engorgio = true;
                    self.game.engorgio_final = true;
                }
            }
            Some(Interactable::Door) => {
                if self.game.wand_grabbed && self.distance_to(ObjectKind::Door) < reach.spell_reach {
                    info!("door unlocked");
                    self.game.alohomora = true;
                }
            }
            None => debug!("click hit nothing"),
        }
    }

    fn obstacles(&self) -> Obstacles {
        Obstacles {
            table: self.object(ObjectKind::Table).placement.position,
            cauldron: self.object(ObjectKind::Cauldron).placement.position,
            tree: self.object(ObjectKind::Tree).placement.position,
            door: self.object(ObjectKind::Door).placement.position,
            cauldron_enlarged: self.game.cauldron_enlarged,
            door_open: self.game.alohomora,
        }
    }

    fn try_move(&mut self, obstacles: &Obstacles, candidate: Point3) {
        if check_collision(&self.config.collision, obstacles, candidate) {
            debug!("blocked at {:?}", candidate);
        } else {
            self.camera.position = candidate;
        }
    }

    /// Walk the camera for `dt` seconds according to the held arrow keys.
    /// Static cameras do not move.
    fn move_camera(&mut self, dt: f64) {
        if !self.camera.free_movement || !self.keyboard.any() {
            return;
        }
        let obstacles = self.obstacles();
        let step = dt * self.config.camera.walk_speed;
        let right = self.camera.right();
        let forward = self.camera.direction;

        if self.keyboard.left {
            self.try_move(&obstacles, self.camera.position - step * right);
        }
        if self.keyboard.right {
            self.try_move(&obstacles, self.camera.position + step * right);
        }
        if self.keyboard.up {
            self.try_move(&obstacles, self.camera.position + step * forward);
        }
        if self.keyboard.down {
            self.try_move(&obstacles, self.camera.position - step * forward);
        }
    }

    fn grow_cauldron(&mut self) {
        let factor = self.config.interaction.growth_factor;
        let offset = self.config.interaction.growth_offset;
        let cauldron = self.object_mut(ObjectKind::Cauldron);
        cauldron.placement.size *= factor;
        cauldron.placement.position += DVec3::splat(offset);
        self.game.engorgio = false;
        self.game.cauldron_enlarged = true;
        debug!("cauldron grown to size {}", self.object(ObjectKind::Cauldron).placement.size);
    }

    /// Advance the simulation to time `now` (seconds).
    pub fn update(&mut self, now: f64) {
        self.game.elapsed_time = now;
        let dt = now - self.game.last_update_time;
        self.game.last_update_time = now;

        self.move_camera(dt);

        if self.game.engorgio && !self.game.cauldron_enlarged {
            self.grow_cauldron();
        }
        self.game.engorgio = false;

        let key = self.handles.broom;
        let broom = &mut self.objects[key];
        if let Some(follower) = broom.follower {
            let t = follower.advance(&self.spline, &mut broom.placement, &mut broom.timing, now);
            debug!("broom at t={:.3}: {:?}", t, broom.placement.position);
        }

        self.object_mut(ObjectKind::Flame).timing.current = now;

        if self.game.game_over {
            self.object_mut(ObjectKind::AnimatedBanner).timing.current = now;
        } else if self.game.all_tasks_done() {
            info!("all tasks done, game over");
            self.object_mut(ObjectKind::AnimatedBanner).restart_timing(now);
            self.game.engorgio_final = false;
            self.game.game_over = true;
            self.keyboard = Keyboard::default();
        }
    }
}
