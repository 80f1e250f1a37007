//! Pin muxing.

use crate::gpio::{pctl_for, PinFunction, Pins};
use crate::hw_traits::gpio::GpioPeriph;
use crate::util::BitsExt;

/// Route `function` onto its pin through the port control register. Does not hand the pin to the
/// alternate function; see [`pin_type_ssi`].
pub fn pin_configure<G: GpioPeriph>(gpio: &G, function: PinFunction) {
    let (mask, bits) = pctl_for(&[function]);
    gpio.pctl_wr(gpio.pctl_rd().clear_mask(mask).set_mask(bits));
}

/// Hand `pins` to their alternate function as standard 2-mA digital pads.
pub fn pin_type_ssi<G: GpioPeriph>(gpio: &G, pins: Pins) {
    let mask = pins.mask();
    gpio.afsel_wr(gpio.afsel_rd().set_mask(mask));
    gpio.dr2r_wr(gpio.dr2r_rd().set_mask(mask));
    gpio.amsel_wr(gpio.amsel_rd().clear_mask(mask));
    gpio.den_wr(gpio.den_rd().set_mask(mask));
}
