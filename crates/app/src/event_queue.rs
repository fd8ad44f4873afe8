//! In-process event queue backed by a tokio mpsc channel.
//!
//! Any number of producers submit [`Event`]s through cloned
//! [`EventQueue`] handles; a single [`EventLoop`] takes them one at a time,
//! so an event's scenes and alerts complete before the next event is read.

use std::future::Future;

use tokio::sync::mpsc;

use scenehub_domain::error::SceneHubError;
use scenehub_domain::event::Event;
use scenehub_domain::time::now;

use crate::controller::HomeController;
use crate::ports::{Clock, DeviceDirectory, Notifier};

/// Create a bounded queue and its consuming loop.
///
/// A zero `capacity` is raised to one.
#[must_use]
pub fn channel(capacity: usize) -> (EventQueue, EventLoop) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (EventQueue { sender }, EventLoop { receiver })
}

/// Producer handle. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventQueue {
    sender: mpsc::Sender<Event>,
}

impl EventQueue {
    /// Enqueue an event, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::QueueClosed`] once the loop has stopped.
    pub async fn submit(&self, event: Event) -> Result<(), SceneHubError> {
        self.sender
            .send(event)
            .await
            .map_err(|_| SceneHubError::QueueClosed)
    }

    /// Blocking variant of [`submit`](Self::submit) for producers running
    /// on plain threads. Must not be called from inside an async context.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::QueueClosed`] once the loop has stopped.
    pub fn blocking_submit(&self, event: Event) -> Result<(), SceneHubError> {
        self.sender
            .blocking_send(event)
            .map_err(|_| SceneHubError::QueueClosed)
    }
}

/// Single consumer that feeds queued events to a [`HomeController`].
#[derive(Debug)]
pub struct EventLoop {
    receiver: mpsc::Receiver<Event>,
}

impl EventLoop {
    /// Process events sequentially until every [`EventQueue`] handle has
    /// been dropped. Returns the number of events processed.
    pub async fn run<D, N, C>(self, controller: &HomeController<D, N, C>) -> usize
    where
        D: DeviceDirectory,
        N: Notifier,
        C: Clock,
    {
        self.run_until(controller, std::future::pending()).await
    }

    /// Like [`run`](Self::run), but also stops once `shutdown` completes.
    /// An event already being processed is finished first; events still
    /// queued are dropped.
    pub async fn run_until<D, N, C, S>(
        mut self,
        controller: &HomeController<D, N, C>,
        shutdown: S,
    ) -> usize
    where
        D: DeviceDirectory,
        N: Notifier,
        C: Clock,
        S: Future<Output = ()>,
    {
        let mut shutdown = std::pin::pin!(shutdown);
        let mut processed = 0;
        loop {
            let event = tokio::select! {
                event = self.receiver.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
                () = &mut shutdown => {
                    tracing::info!("shutdown requested");
                    break;
                }
            };
            let waited_ms = event.age(now()).num_milliseconds();
            let fired = controller.dispatch(&event).await;
            tracing::debug!(
                %event,
                received_at = %event.received_at,
                waited_ms,
                fired = fired.len(),
                "event processed"
            );
            processed += 1;
        }
        tracing::info!(processed, "event loop stopped");
        processed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use scenehub_domain::command::CommandTable;
    use scenehub_domain::device::DeviceKind;
    use scenehub_domain::rule::Rule;
    use scenehub_domain::scene::{Action, Scene};
    use scenehub_domain::time::TimeOfDay;

    use super::*;
    use crate::clock::FixedClock;
    use crate::testing::{InMemoryDirectory, SpyNotifier, device};

    #[tokio::test]
    async fn should_process_events_in_submission_order() {
        let home = Arc::new(
            InMemoryDirectory::default().with(device("plug", "Plug", DeviceKind::Plug), None),
        );
        let notifier = Arc::new(SpyNotifier::default());
        let controller = HomeController::new(
            Arc::clone(&home),
            CommandTable::standard(),
            Arc::clone(&notifier),
            FixedClock::new(TimeOfDay::from_hms_opt(20, 0, 0).unwrap()),
        );
        let flip = Scene::builder()
            .name("Flip")
            .action(Action::new("plug", "toggle"))
            .build()
            .unwrap();
        controller.add_scene(flip).await;
        controller
            .add_rule(
                Rule::builder()
                    .event("pressed")
                    .device("plug")
                    .scene("Flip")
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        controller
            .add_rule(Rule::builder().event("sunset").scene("Flip").build().unwrap())
            .await
            .unwrap();

        let (queue, event_loop) = channel(4);
        let producer = tokio::spawn(async move {
            queue.submit(Event::device("pressed", "plug")).await.unwrap();
            queue.submit(Event::global("sunset")).await.unwrap();
            queue.submit(Event::global("unrelated")).await.unwrap();
        });

        let processed = event_loop.run(&controller).await;
        producer.await.unwrap();

        assert_eq!(processed, 3);
        assert!(!home.snapshot("plug").await.state.on);
        let messages = notifier.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Alert: pressed"));
        assert_eq!(messages[1], "Alert: sunset (global trigger)");
    }

    #[tokio::test]
    async fn should_stop_on_shutdown_while_producers_are_still_alive() {
        let controller = HomeController::new(
            Arc::new(InMemoryDirectory::default()),
            CommandTable::standard(),
            Arc::new(SpyNotifier::default()),
            FixedClock::new(TimeOfDay::from_hms_opt(20, 0, 0).unwrap()),
        );
        let (queue, event_loop) = channel(4);
        queue.submit(Event::global("sunset")).await.unwrap();
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();

        let run = event_loop.run_until(&controller, async {
            let _ = stopped.await;
        });
        let trigger = async {
            tokio::task::yield_now().await;
            stop.send(()).unwrap();
        };
        let (processed, ()) = tokio::join!(run, trigger);

        assert_eq!(processed, 1);
        assert!(matches!(
            queue.submit(Event::global("sunrise")).await,
            Err(SceneHubError::QueueClosed)
        ));
    }

    #[test]
    fn should_submit_from_a_plain_thread() {
        let (queue, mut event_loop) = channel(2);
        std::thread::spawn(move || {
            queue.blocking_submit(Event::global("sunset")).unwrap();
        })
        .join()
        .unwrap();

        let event = event_loop.receiver.try_recv().unwrap();
        assert_eq!(event.event_type, "sunset");
        assert!(event_loop.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_return_queue_closed_when_loop_is_gone() {
        let (queue, event_loop) = channel(1);
        drop(event_loop);
        let result = queue.submit(Event::global("sunset")).await;
        assert!(matches!(result, Err(SceneHubError::QueueClosed)));
    }

    #[tokio::test]
    async fn should_accept_zero_capacity() {
        let (queue, _event_loop) = channel(0);
        assert!(queue.submit(Event::global("sunset")).await.is_ok());
    }
}
