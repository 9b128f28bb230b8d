//! Lifecycle macros for the analysis entry points.
//!
//! An operation logs one `start` and then either `end` or `end_error`.
//! Every event carries `component`, `op` and `event`; extra `key = value`
//! fields are passed straight through to `tracing`.

#[doc(hidden)]
#[macro_export]
macro_rules! __lifecycle_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// `start` event at info level.
///
/// ```
/// # use planlens_core::log_op_start;
/// log_op_start!("analyse_plan");
/// log_op_start!("analyse_plan", section = "resource_changes");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__lifecycle_event!(
            info,
            $op,
            planlens_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// `end` event at info level; `duration_ms` comes first.
///
/// ```
/// # use planlens_core::log_op_end;
/// log_op_end!("diff_states", duration_ms = 3, diff_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__lifecycle_event!(
            info,
            $op,
            planlens_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// `end_error` event at error level.
///
/// Anything convertible into [`LensError`](crate::errors::LensError) is
/// accepted; the event gets its `err.kind` and `err.code`.
///
/// ```
/// # use planlens_core::log_op_error;
/// # use planlens_core::errors::PlanLensError;
/// let err = PlanLensError::EmptyBatch { section: "resource_drift".to_string() };
/// log_op_error!("analyse_plan", err, duration_ms = 1, section = "resource_drift");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let lens_err: $crate::errors::LensError = $err.into();
        $crate::__lifecycle_event!(
            error,
            $op,
            planlens_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?lens_err.kind(),
            err.code = lens_err.code()
            $(, $($field)*)?
        )
    }};
}
