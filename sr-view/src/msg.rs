use std::fmt;
use std::rc::Rc;

use sr_core::accident::AccidentRecord;
use sr_core::cluster::ClusterId;
use sr_core::geo::{Bounds, LatLng};
use sr_core::route::{CandidateRoute, FormField, RouteForm};
use sr_core::wire::{ScoreRoutesRequest, ScoreRoutesResponse};
use sr_data::chart::ChartKind;

/// Tags an outstanding backend request so late replies can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything that can happen to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A keystroke or an autocomplete selection in the route form
    FormChanged { field: FormField, value: String },
    /// The route form was submitted
    Submit,
    /// Directions came back for the submitted form
    RoutesLoaded {
        start: LatLng,
        dest: LatLng,
        routes: Vec<CandidateRoute>,
    },
    DirectionsFailed(String),
    ScoresLoaded {
        request: RequestId,
        response: ScoreRoutesResponse,
    },
    ScoresFailed {
        request: RequestId,
        error: String,
    },
    /// A route selector button or a route line on the map
    SelectRoute(usize),
    /// A cluster marker on the map
    ClusterClicked {
        cluster_id: ClusterId,
        location: LatLng,
        avg_severity: f64,
    },
    ClusterLoaded {
        request: RequestId,
        accidents: Vec<AccidentRecord>,
    },
    ClusterFailed {
        request: RequestId,
        error: String,
    },
    ReturnToRoute,
    SelectChart(ChartKind),
    ToggleTutorial,
}

/// Work for the runtime, in the order it should be performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Geocode both endpoints and ask for driving directions
    FetchDirections(RouteForm),
    FetchScores {
        request: RequestId,
        body: ScoreRoutesRequest,
    },
    FetchClusterAccidents {
        request: RequestId,
        cluster_id: ClusterId,
    },
    /// Replace the route layer and fit the map to `bounds`
    ShowRoutes {
        bounds: Bounds,
        paths: Vec<Vec<LatLng>>,
        active: usize,
    },
    /// Restyle the drawn routes, emphasizing the given index
    SelectMapRoute(usize),
    RenderChart {
        kind: ChartKind,
        accidents: Rc<[AccidentRecord]>,
    },
}

impl Effect {
    /// True for effects that go over the network.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Effect::FetchDirections(_)
                | Effect::FetchScores { .. }
                | Effect::FetchClusterAccidents { .. }
        )
    }
}
