/// GPIO port registers involved in routing pins to a digital alternate function.
pub trait GpioPeriph {
    /// Alternate function select
    fn afsel_rd(&self) -> u32;
    /// Alternate function select
    fn afsel_wr(&self, bits: u32);

    /// Port control (pin mux), four bits per pin
    fn pctl_rd(&self) -> u32;
    /// Port control (pin mux), four bits per pin
    fn pctl_wr(&self, bits: u32);

    /// Analog mode select
    fn amsel_rd(&self) -> u32;
    /// Analog mode select
    fn amsel_wr(&self, bits: u32);

    /// Digital enable
    fn den_rd(&self) -> u32;
    /// Digital enable
    fn den_wr(&self, bits: u32);

    /// 2-mA drive select
    fn dr2r_rd(&self) -> u32;
    /// 2-mA drive select
    fn dr2r_wr(&self, bits: u32);
}

#[cfg(feature = "tm4c123gh6pm")]
mod pac_impl {
    use super::GpioPeriph;
    use tm4c123x as pac;

    macro_rules! gpio_impl {
        ($($Px:ident),*) => {
            $(
                impl GpioPeriph for pac::$Px {
                    reg_methods!(afsel, afsel_rd, afsel_wr);
                    reg_methods!(pctl, pctl_rd, pctl_wr);
                    reg_methods!(amsel, amsel_rd, amsel_wr);
                    reg_methods!(den, den_rd, den_wr);
                    reg_methods!(dr2r, dr2r_rd, dr2r_wr);
                }
            )*
        };
    }

    gpio_impl!(GPIO_PORTA);
}
