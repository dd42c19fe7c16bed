use std::time::Instant;

use anyhow::{Result, anyhow};
use egui_sfml::SfEgui;
use egui_sfml::egui;
use glam::DVec2;
use sfml::{graphics::*, system::*, window::*};
use tracing::{debug, info};

use ball_simulator::config::MAX_SPEED;
use ball_simulator::{Config, World};

use crate::renderer;

pub fn run(config: Config) -> Result<()> {
    let Config {
        window: window_config,
        world: world_config,
        sim,
    } = config;

    let mut world = World::new(world_config)?;

    let texture_image = renderer::circle(renderer::TEXTURE_RADIUS, Color::WHITE)?;
    let texture_size = (renderer::TEXTURE_RADIUS * 2) as i32;
    let texture_rect = Rect::new(0, 0, texture_size, texture_size);
    let mut texture = Texture::from_image(&texture_image, texture_rect)
        .map_err(|e| anyhow!("failed to create circle texture: {e:?}"))?;
    texture.set_smooth(true);

    let bounds = world.bounds();
    let mut window = RenderWindow::new(
        (bounds.width as u32, bounds.height as u32),
        &window_config.title,
        Style::DEFAULT,
        &ContextSettings {
            antialiasing_level: window_config.antialiasing,
            ..Default::default()
        },
    )
    .map_err(|e| anyhow!("failed to create window: {e:?}"))?;

    window.set_vertical_sync_enabled(window_config.vsync);
    info!(
        width = bounds.width,
        height = bounds.height,
        vsync = window_config.vsync,
        "window created"
    );

    let mut sfegui = SfEgui::new(&window);

    let mut shape = Sprite::new();
    shape.set_texture(&texture, true);
    let origin = renderer::TEXTURE_RADIUS as f32;
    shape.set_origin((origin, origin));

    let mut clock = Clock::start().map_err(|e| anyhow!("failed to start clock: {e:?}"))?;

    // used in egui
    let mut speed = sim.speed.min(MAX_SPEED);
    let mut paused = false;
    let mut gravity = world.gravity();
    let mut restitution = world.restitution();
    let mut spawn_per_click = sim.spawn_per_click;
    let mut show_info = false;
    //

    while window.is_open() {
        let dt = clock.restart();

        while let Some(event) = window.poll_event() {
            sfegui.add_event(&event);
            match event {
                Event::Closed => window.close(),

                Event::Resized { width, height } => {
                    world.resize(width as f64, height as f64);
                    let area = FloatRect::new(0.0, 0.0, width as f32, height as f32);
                    let view = View::from_rect(area)
                        .map_err(|e| anyhow!("failed to create view: {e:?}"))?;
                    window.set_view(&view);
                    debug!(width, height, "resized");
                }

                Event::MouseButtonPressed {
                    button: mouse::Button::Left,
                    x,
                    y,
                } => {
                    let added = world.spawn(DVec2::new(x as _, y as _), spawn_per_click);
                    info!(added, bodies = world.len(), "spawned");
                }

                Event::KeyPressed { code: Key::Up, .. } => speed = sim.faster(speed),
                Event::KeyPressed { code: Key::Down, .. } => speed = sim.slower(speed),
                Event::KeyPressed { code: Key::P, .. } => paused = !paused,
                Event::KeyPressed { code: Key::R, .. } => {
                    world.remove_last(spawn_per_click);
                    info!(bodies = world.len(), "removed last batch");
                }
                Event::KeyPressed { code: Key::C, .. } => {
                    world.clear();
                    info!("cleared");
                }

                _ => {}
            }
        }

        world.set_gravity(gravity);
        world.set_restitution(restitution);

        let frame_dt = (dt.as_seconds() as f64).min(sim.max_dt);
        let effective_speed = if paused { 0.0 } else { speed };

        let timer = Instant::now();
        world.step(frame_dt, effective_speed);
        let step_time = timer.elapsed().as_nanos() as f64 / 1e6;

        window.clear(Color::BLACK);

        let timer = Instant::now();
        for body in world.bodies() {
            let scale = (body.radius / renderer::TEXTURE_RADIUS as f64) as f32;
            shape.set_scale((scale, scale));
            shape.set_position((body.position.x as f32, body.position.y as f32));
            shape.set_color(renderer::speed_color(body.velocity.length()));

            window.draw(&shape);
        }
        let draw_time = timer.elapsed().as_nanos() as f64 / 1e6;

        let frame_time = dt.as_milliseconds();
        let bodies = world.len();
        let capacity = world.capacity();
        let energy = world.kinetic_energy();

        let di = sfegui
            .run(&mut window, |_rw, ctx| {
                egui::Window::new("Settings")
                    .default_pos((10.0, 10.0))
                    .collapsible(true)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.horizontal(|ui| {
                            ui.checkbox(&mut paused, "Pause");
                            ui.add_enabled(
                                !paused,
                                egui::Slider::new(&mut speed, 0.0..=MAX_SPEED).text("Speed"),
                            );
                        });

                        ui.separator();

                        ui.add(egui::Slider::new(&mut gravity, -2000.0..=2000.0).text("Gravity"));
                        ui.add(egui::Slider::new(&mut restitution, 0.0..=1.0).text("Restitution"));
                        ui.add(
                            egui::Slider::new(&mut spawn_per_click, 1..=50)
                                .text("Bodies per click"),
                        );

                        ui.checkbox(&mut show_info, "Show internal info");
                    });

                egui::Window::new("Info")
                    .collapsible(true)
                    .open(&mut show_info)
                    .resizable(false)
                    .show(ctx, |ui| {
                        let fps = 1.0 / (frame_time.max(1) as f32 / 1000.0);
                        ui.label(format!("FPS: {fps:.0}"));
                        ui.label(format!("Frame Time: {frame_time}ms"));
                        ui.label(format!("Step time: {step_time:.2}ms"));
                        ui.label(format!("Draw time: {draw_time:.2}ms"));
                        ui.separator();
                        ui.label(format!("Bodies: {bodies}/{capacity}"));
                        ui.label(format!("Kinetic energy: {energy:.0}"));
                    });
            })
            .map_err(|e| anyhow!("egui frame failed: {e:?}"))?;

        sfegui.draw(di, &mut window, None);

        window.display();
    }

    info!(bodies = world.len(), "shutdown");
    Ok(())
}
