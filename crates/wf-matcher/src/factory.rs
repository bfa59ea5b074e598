//! Building matcher stacks chosen at run time.

use wf_config::{CompositionKind, MatcherSettings, RewriteSetting};
use wf_fst::Label;

use crate::{
    explicit::Explicit,
    matcher::{FstHandle, Matcher},
    multi_eps::{MultiEps, MultiEpsFlags},
    phi::Phi,
    rewrite::RewriteMode,
    rho::Rho,
    sigma::Sigma,
    sorted_range::SortedRangeMatcher,
};

/// A matcher stack over [`SortedRangeMatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// The sorted-range matcher alone.
    Plain,
    /// [`Explicit`] over the sorted-range matcher.
    Explicit,
    /// [`Sigma`] fallback on `label`.
    Sigma {
        /// Sigma label.
        label: Label,
        /// Rewrite mode.
        rewrite: RewriteMode,
    },
    /// [`Rho`] fallback on `label`.
    Rho {
        /// Rho label.
        label: Label,
        /// Rewrite mode.
        rewrite: RewriteMode,
    },
    /// [`Phi`] failure transitions on `label`.
    Phi {
        /// Phi label.
        label: Label,
        /// Whether a phi self-loop matches the requested label.
        phi_loop: bool,
        /// Rewrite mode.
        rewrite: RewriteMode,
    },
    /// [`MultiEps`] with the given labels.
    MultiEps {
        /// Non-consuming labels.
        labels: Vec<Label>,
        /// Behaviour switches.
        flags: MultiEpsFlags,
    },
}

impl From<RewriteSetting> for RewriteMode {
    fn from(setting: RewriteSetting) -> Self {
        match setting {
            RewriteSetting::Auto => Self::Auto,
            RewriteSetting::Always => Self::Always,
            RewriteSetting::Never => Self::Never,
        }
    }
}

impl Composition {
    /// The stack described by the `[matcher]` settings.
    pub fn from_settings(settings: &MatcherSettings) -> Self {
        let label = settings.special_label;
        let rewrite = RewriteMode::from(settings.rewrite);
        match settings.composition {
            CompositionKind::Plain => Self::Plain,
            CompositionKind::Explicit => Self::Explicit,
            CompositionKind::Sigma => Self::Sigma { label, rewrite },
            CompositionKind::Rho => Self::Rho { label, rewrite },
            CompositionKind::Phi => Self::Phi {
                label,
                phi_loop: settings.phi_loop,
                rewrite,
            },
            CompositionKind::MultiEps => {
                let mut flags = MultiEpsFlags::EMPTY;
                if settings.multi_eps_loop {
                    flags |= MultiEpsFlags::LOOP;
                }
                if settings.multi_eps_list {
                    flags |= MultiEpsFlags::LIST;
                }
                Self::MultiEps {
                    labels: settings.multi_eps_labels.clone(),
                    flags,
                }
            }
        }
    }

    /// Short name of the stack.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Explicit => "explicit",
            Self::Sigma { .. } => "sigma",
            Self::Rho { .. } => "rho",
            Self::Phi { .. } => "phi",
            Self::MultiEps { .. } => "multi_eps",
        }
    }
}

/// Builds the matcher stack `composition` over `fst`.
pub fn make_matcher<'a>(
    fst: impl Into<FstHandle<'a>>,
    threshold: Label,
    composition: &Composition,
) -> Box<dyn Matcher + 'a> {
    let base = SortedRangeMatcher::new(fst, threshold);
    match composition {
        Composition::Plain => Box::new(base),
        Composition::Explicit => Box::new(Explicit::new(base)),
        Composition::Sigma { label, rewrite } => Box::new(Sigma::new(base, *label, *rewrite)),
        Composition::Rho { label, rewrite } => Box::new(Rho::new(base, *label, *rewrite)),
        Composition::Phi {
            label,
            phi_loop,
            rewrite,
        } => Box::new(Phi::new(base, *label, *phi_loop, *rewrite)),
        Composition::MultiEps { labels, flags } => Box::new(MultiEps::with_labels(
            base,
            *flags,
            labels.iter().copied(),
        )),
    }
}
