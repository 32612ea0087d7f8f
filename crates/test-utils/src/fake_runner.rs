use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use nuget_restore::exec::{Invocation, ProcessOutput, ProcessRunner};

/// A fake process runner that:
/// - records every invocation it is asked to run
/// - answers with queued outputs, or an empty success once the queue is empty.
#[derive(Clone, Default)]
pub struct FakeRunner {
    responses: Arc<Mutex<VecDeque<ProcessOutput>>>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an output for the next run.
    pub fn respond(self, output: ProcessOutput) -> Self {
        self.responses.lock().unwrap().push_back(output);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn run_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }
}

impl ProcessRunner for FakeRunner {
    fn run<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = ProcessOutput> + Send + 'a>> {
        let responses = Arc::clone(&self.responses);
        let invocations = Arc::clone(&self.invocations);

        Box::pin(async move {
            invocations.lock().unwrap().push(invocation.clone());
            responses.lock().unwrap().pop_front().unwrap_or_default()
        })
    }
}
