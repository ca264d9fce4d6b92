//! Pass sequencing and the verification points between passes.

use std::fmt;

use clap::ValueEnum;
use front_end::ast::Ast;
use front_end::error::AstError;
use front_end::ids::CallId;
use middle_end::check_ast::{InternalError, PhaseError, VerificationContext, VerifyConfig};
use thiserror::Error;
use tracing::{debug, info};

use crate::passes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Pass {
    Build,
    Normalize,
    Resolve,
}

impl Pass {
    pub const ALL: [Pass; 3] = [Pass::Build, Pass::Normalize, Pass::Resolve];

    pub fn run(self, session: &mut Session) -> Result<(), DriverError> {
        match self {
            Pass::Build => passes::build(session),
            Pass::Normalize => passes::normalize(session),
            Pass::Resolve => passes::resolve(session),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Build => write!(f, "build"),
            Pass::Normalize => write!(f, "normalize"),
            Pass::Resolve => write!(f, "resolve"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("AST verification failed after the {pass} pass: {error}")]
    Verification {
        pass: Pass,
        #[source]
        error: InternalError,
    },

    #[error(transparent)]
    Ast(#[from] AstError),

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error("no routine named `{0}`")]
    UnknownRoutine(String),

    #[error("argument list {0} does not start with a routine name")]
    MalformedActuals(CallId),
}

/// Everything one compilation owns: the tree and its verification state
#[derive(Debug, Default)]
pub struct Session {
    pub ast: Ast,
    pub ctx: VerificationContext,
}

impl Session {
    pub fn new(config: VerifyConfig) -> Self {
        Self {
            ast: Ast::new(),
            ctx: VerificationContext::new(config),
        }
    }

    /// Run every enabled check against the current tree
    pub fn verify(&self) -> Result<(), InternalError> {
        self.ctx.checker(&self.ast).run_all()
    }
}

pub struct Pipeline {
    session: Session,
    stop_after: Option<Pass>,
}

impl Pipeline {
    pub fn new(config: VerifyConfig) -> Self {
        Self {
            session: Session::new(config),
            stop_after: None,
        }
    }

    pub fn stop_after(mut self, pass: Pass) -> Self {
        self.stop_after = Some(pass);
        self
    }

    /// Run the passes in order, verifying after each one. A verification
    /// failure ends the run; the session is returned either way so the
    /// caller can report against it.
    pub fn run(mut self) -> (Session, Result<(), DriverError>) {
        let result = self.run_passes();
        (self.session, result)
    }

    fn run_passes(&mut self) -> Result<(), DriverError> {
        for pass in Pass::ALL {
            info!(%pass, "running pass");
            pass.run(&mut self.session)?;

            if self.session.ctx.config.enabled {
                self.session
                    .verify()
                    .map_err(|error| DriverError::Verification { pass, error })?;
                debug!(%pass, "AST verified");
            }

            if self.stop_after == Some(pass) {
                info!(%pass, "stopping early");
                break;
            }
        }
        Ok(())
    }
}
