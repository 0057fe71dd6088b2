use std::time::Duration;

use bevy::app::{AppExit, ScheduleRunnerSettings};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use chroma_drop::core::Board;
use chroma_drop::{CollapseEvent, GameConfig, GameOverEvent, GamePlugin, Tick};

#[derive(Resource)]
struct TickTimer(Timer);

fn main() {
    let config = GameConfig::default();

    App::new()
        .insert_resource(ScheduleRunnerSettings::run_loop(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(TickTimer(Timer::new(config.tick_duration, TimerMode::Repeating)))
        .insert_resource(config)
        .add_plugins(MinimalPlugins)
        .add_plugin(LogPlugin::default())
        .add_plugin(GamePlugin)
        .add_system(drive_ticks)
        .add_system(report_collapses)
        .add_system(exit_on_game_over)
        .run();
}

fn drive_ticks(time: Res<Time>, mut timer: ResMut<TickTimer>, mut ev_tick: EventWriter<Tick>) {
    if timer.0.tick(time.delta()).just_finished() {
        ev_tick.send(Tick);
    }
}

fn report_collapses(mut ev_collapse: EventReader<CollapseEvent>, board: Res<Board>) {
    for ev in ev_collapse.iter() {
        info!("cleared {} cells, score {}\n{}", ev.cells.len(), ev.score, *board);
    }
}

fn exit_on_game_over(
    mut ev_game_over: EventReader<GameOverEvent>,
    board: Res<Board>,
    mut ev_exit: EventWriter<AppExit>,
) {
    for ev in ev_game_over.iter() {
        info!("final score {}\n{}", ev.score, *board);
        ev_exit.send(AppExit);
    }
}
