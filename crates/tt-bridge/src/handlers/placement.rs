use crate::dispatch::{HostServices, PlacementError, RequestResult};

/// `persist-window-state`: snapshot the window placement.
pub fn handle_persist_window_state<S: HostServices + ?Sized>(services: &mut S) -> RequestResult {
    match services.persist_window_state() {
        Ok(()) => Ok(None),
        Err(PlacementError::WindowUnavailable) => Err("native window unavailable".into()),
        Err(PlacementError::CaptureFailed) => {
            Err("native host window state capture failed".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::FakeHost;

    #[test]
    fn maps_placement_outcomes() {
        let mut host = FakeHost {
            placement: Some(Ok(())),
            ..FakeHost::alive()
        };
        assert_eq!(handle_persist_window_state(&mut host), Ok(None));

        host.placement = Some(Err(PlacementError::CaptureFailed));
        assert_eq!(
            handle_persist_window_state(&mut host),
            Err("native host window state capture failed".into())
        );

        host.placement = None;
        assert_eq!(
            handle_persist_window_state(&mut host),
            Err("native window unavailable".into())
        );
    }
}
