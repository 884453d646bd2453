//! Fixed-rate frame driver for hosts without their own frame hook
//!
//! A tokio task owns the simulator. Commands reach it through a single bounded
//! queue, so state is only ever mutated by that task, between ticks. After
//! every tick and every applied command a snapshot is broadcast to renderers.

use eeg_core::{config_error, EegError, EegResult, SimulatorConfig, WaveBand};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};
use crate::eeg_simulator::EEGSimulator;
use crate::simulation_state::{Command, SimulationState};

/// Pending commands accepted before `try_submit` reports a full queue
pub const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Snapshots buffered per subscriber before it starts lagging
pub const SNAPSHOT_BUFFER: usize = 16;

/// Tick period for a frame rate. Rates whose period is zero or not
/// representable are rejected instead of reaching the timer.
pub fn frame_period(frame_rate: f32) -> EegResult<Duration> {
    let period = Duration::try_from_secs_f32(1.0 / frame_rate)
        .map_err(|e| config_error!("frame rate {} Hz has no valid period: {}", frame_rate, e))?;

    if period.is_zero() {
        return Err(config_error!("frame rate {} Hz is too high", frame_rate));
    }

    Ok(period)
}

/// Consistent view of the simulation published once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub state: SimulationState,
    /// Catalog entry of the selected band
    pub band: WaveBand,
    /// Frames ticked so far
    pub frame: u64,
}

struct DriverRequest {
    command: Command,
    reply: Option<oneshot::Sender<EegResult<()>>>,
}

/// Cloneable handle for submitting commands. Dropping every handle stops
/// the driver.
#[derive(Clone)]
pub struct FrameDriverHandle {
    requests: mpsc::Sender<DriverRequest>,
    snapshots: broadcast::Sender<FrameSnapshot>,
}

impl FrameDriverHandle {
    /// Submit a command and wait for the driver's verdict
    pub async fn submit(&self, command: Command) -> EegResult<()> {
        let (reply, verdict) = oneshot::channel();
        self.requests
            .send(DriverRequest { command, reply: Some(reply) })
            .await
            .map_err(|_| EegError::DriverClosed)?;

        verdict.await.map_err(|_| EegError::DriverClosed)?
    }

    /// Queue a command without waiting. Rejections are logged by the driver.
    pub fn try_submit(&self, command: Command) -> EegResult<()> {
        self.requests
            .try_send(DriverRequest { command, reply: None })
            .map_err(|e| match e {
                TrySendError::Full(_) => EegError::CommandQueueFull {
                    capacity: COMMAND_QUEUE_CAPACITY,
                },
                TrySendError::Closed(_) => EegError::DriverClosed,
            })
    }

    /// New receiver for frame snapshots
    pub fn subscribe(&self) -> broadcast::Receiver<FrameSnapshot> {
        self.snapshots.subscribe()
    }
}

/// Frame driver task state
pub struct FrameDriver {
    simulator: EEGSimulator,
    period: Duration,
    snapshots: broadcast::Sender<FrameSnapshot>,
    requests: mpsc::Receiver<DriverRequest>,
}

impl FrameDriver {
    /// Create a driver and its first handle
    pub fn new(config: SimulatorConfig) -> EegResult<(Self, FrameDriverHandle)> {
        let period = frame_period(config.frame_rate)?;
        let simulator = EEGSimulator::new(config)?;
        let (snapshot_sender, _) = broadcast::channel(SNAPSHOT_BUFFER);
        let (request_sender, request_receiver) = mpsc::channel(COMMAND_QUEUE_CAPACITY);

        let handle = FrameDriverHandle {
            requests: request_sender,
            snapshots: snapshot_sender.clone(),
        };

        Ok((
            FrameDriver {
                simulator,
                period,
                snapshots: snapshot_sender,
                requests: request_receiver,
            },
            handle,
        ))
    }

    fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            state: self.simulator.state(),
            band: *self.simulator.active_band(),
            frame: self.simulator.frames(),
        }
    }

    fn publish(&self) {
        // No subscribers is fine
        let _ = self.snapshots.send(self.snapshot());
    }

    /// Run until every handle is dropped
    pub async fn run(mut self) {
        let frame_rate = self.simulator.config().frame_rate;
        let mut frame_timer = interval(self.period);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(frame_rate, time_step = self.simulator.config().fixed_time_step, "frame driver started");

        loop {
            tokio::select! {
                _ = frame_timer.tick() => {
                    self.simulator.tick();
                    self.publish();
                }

                request = self.requests.recv() => {
                    match request {
                        Some(DriverRequest { command, reply }) => {
                            let result = self.simulator.apply(command);
                            self.publish();

                            if let Some(reply) = reply {
                                let _ = reply.send(result);
                            }
                        }
                        None => {
                            info!(frames = self.simulator.frames(), "command queue closed, frame driver stopped");
                            break;
                        }
                    }
                }
            }
        }
    }
}

/// Spawn a frame driver on the current tokio runtime
pub fn start_frame_driver(config: SimulatorConfig) -> EegResult<(
    broadcast::Receiver<FrameSnapshot>,
    FrameDriverHandle,
)> {
    let (driver, handle) = FrameDriver::new(config)?;
    let snapshots = handle.subscribe();

    tokio::spawn(driver.run());

    Ok((snapshots, handle))
}

/// Drain a receiver down to its newest snapshot
pub fn latest_snapshot(receiver: &mut broadcast::Receiver<FrameSnapshot>) -> Option<FrameSnapshot> {
    let mut latest = None;
    loop {
        match receiver.try_recv() {
            Ok(snapshot) => latest = Some(snapshot),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "snapshot consumer lagging");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use eeg_core::BandId;
    use tokio::time::{sleep, timeout};

    fn fast_config() -> SimulatorConfig {
        SimulatorConfig {
            frame_rate: 100.0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_driver_ticks_and_publishes() {
        let (mut snapshots, _handle) = start_frame_driver(fast_config()).unwrap();

        sleep(Duration::from_millis(200)).await;

        let snapshot = latest_snapshot(&mut snapshots).expect("no snapshot published");
        assert!(snapshot.frame >= 3, "only {} frames", snapshot.frame);
        assert!(snapshot.state.elapsed_time > 0.0);
        assert_eq!(snapshot.band.id, BandId::Delta);
    }

    #[tokio::test]
    async fn test_commands_are_applied() {
        let (mut snapshots, handle) = start_frame_driver(fast_config()).unwrap();

        handle.submit(Command::SelectBand(BandId::Alpha)).await.unwrap();
        handle.submit(Command::SetAmplitude(80.0)).await.unwrap();

        sleep(Duration::from_millis(50)).await;
        let snapshot = latest_snapshot(&mut snapshots).unwrap();
        assert_eq!(snapshot.state.selected_band, BandId::Alpha);
        assert_eq!(snapshot.band.frequency_hz, 10.0);
        assert_eq!(snapshot.state.amplitude_scale, 80.0);
    }

    #[tokio::test]
    async fn test_rejected_command_reported() {
        let (_snapshots, handle) = start_frame_driver(fast_config()).unwrap();

        let result = handle.submit(Command::SetSpeed(0.0)).await;
        assert!(matches!(result, Err(EegError::OutOfRange { .. })));

        // Driver keeps running after a rejection
        assert!(handle.submit(Command::SetSpeed(2.0)).await.is_ok());
    }

    #[tokio::test]
    async fn test_paused_driver_keeps_publishing() {
        let (mut snapshots, handle) = start_frame_driver(fast_config()).unwrap();

        handle.submit(Command::TogglePlay).await.unwrap();
        sleep(Duration::from_millis(50)).await;
        let first = latest_snapshot(&mut snapshots).unwrap();

        sleep(Duration::from_millis(100)).await;
        let second = latest_snapshot(&mut snapshots).unwrap();

        assert!(!second.state.playing);
        assert!(second.frame > first.frame);
        assert_eq!(second.state.elapsed_time, first.state.elapsed_time);
    }

    #[test]
    fn test_frame_period_bounds() {
        assert_eq!(frame_period(4.0).unwrap(), Duration::from_millis(250));

        assert!(matches!(frame_period(1.0e10), Err(EegError::InvalidConfig { .. })));
        assert!(matches!(frame_period(1.0e-40), Err(EegError::InvalidConfig { .. })));
        assert!(frame_period(0.0).is_err());
        assert!(frame_period(f32::NAN).is_err());
    }

    #[tokio::test]
    async fn test_extreme_frame_rates_fail_before_spawning() {
        for frame_rate in [1.0e10, 1.0e-10] {
            let config = SimulatorConfig { frame_rate, ..Default::default() };
            let result = start_frame_driver(config);
            assert!(matches!(result, Err(EegError::InvalidConfig { .. })));
        }

        // Highest accepted rate still runs and answers commands
        let config = SimulatorConfig { frame_rate: 1000.0, ..Default::default() };
        let (_snapshots, handle) = start_frame_driver(config).unwrap();
        assert!(handle.submit(Command::Reset).await.is_ok());
    }

    #[tokio::test]
    async fn test_dropping_handles_stops_driver() {
        let (driver, handle) = FrameDriver::new(fast_config()).unwrap();
        let task = tokio::spawn(driver.run());

        handle.try_submit(Command::Reset).unwrap();
        drop(handle);

        assert!(timeout(Duration::from_secs(1), task).await.is_ok());
    }
}
