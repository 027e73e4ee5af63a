use super::Problem;
use crate::io::ConfigurablePrintTarget;
use crate::params::*;
use std::fs::File;
use std::io::Write;

// Parameter accessors.  All of them go through the store, which
// validates keys, kinds and domains in one place.

impl Problem {
    /// the parameter store of this problem
    pub fn params(&self) -> &ControlParams {
        &self.params
    }

    /// mutable access to the parameter store
    pub fn params_mut(&mut self) -> &mut ControlParams {
        &mut self.params
    }

    /// current value of a parameter
    pub fn get_param(&self, key: ParamKey) -> ParamValue {
        self.params.get(key)
    }

    /// Set a parameter.  Fails on a read-only key, a value of the wrong
    /// kind or a value outside the domain of the key.
    #[must_use = "a rejected parameter write leaves the old value in place"]
    pub fn set_param(&mut self, key: ParamKey, value: impl Into<ParamValue>) -> Result<(), ParamError> {
        self.params.set(key, value)
    }

    pub fn get_int_param(&self, key: ParamKey) -> Result<i32, ParamError> {
        self.params.get_int(key)
    }

    pub fn get_real_param(&self, key: ParamKey) -> Result<f64, ParamError> {
        self.params.get_real(key)
    }

    #[must_use = "a rejected parameter write leaves the old value in place"]
    pub fn set_int_param(&mut self, key: ParamKey, value: i32) -> Result<(), ParamError> {
        self.params.set_int(key, value)
    }

    #[must_use = "a rejected parameter write leaves the old value in place"]
    pub fn set_real_param(&mut self, key: ParamKey, value: f64) -> Result<(), ParamError> {
        self.params.set_real(key, value)
    }

    /// Reinstall the default value of every parameter except the
    /// iteration counter.
    pub fn reset_params(&mut self) {
        self.params.reset();
    }
}

impl ConfigurablePrintTarget for Problem {
    fn print_to_stdout(&mut self) {
        self.out.print_to_stdout()
    }
    fn print_to_file(&mut self, file: File) {
        self.out.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.out.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.out.print_to_buffer()
    }
    fn print_to_tracing(&mut self) {
        self.out.print_to_tracing()
    }
    fn print_to_sink(&mut self) {
        self.out.print_to_sink()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.out.get_print_buffer()
    }
}
