use embedded_hal_mock::delay::MockNoop;
use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction as PinTransaction};
use embedded_hal_mock::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use pcd8544_ticker::{Config, InstructionSet, TemperatureCoefficient, PCD8544};

fn pin(states: &[State]) -> PinMock {
    let transactions: Vec<_> = states.iter().map(|s| PinTransaction::set(s.clone())).collect();
    PinMock::new(&transactions)
}

/// DC levels of the transfers, with CE framing every one of them
fn framed(dc: &[State]) -> (PinMock, PinMock) {
    let mut ce = vec![State::High];
    for _ in dc {
        ce.push(State::Low);
        ce.push(State::High);
    }
    (pin(dc), pin(&ce))
}

#[test]
fn initialise_then_use() {
    use State::*;

    let mut spi = SpiMock::new(&[
        SpiTransaction::write(vec![0x21, 0x06, 0x14, 0xbf, 0x20, 0x0c]),
        SpiTransaction::write(vec![0x80, 0x40]),
        SpiTransaction::write(vec![0u8; 504]),
        SpiTransaction::write(vec![0x80, 0x40]),
        // extended instructions, then TC3
        SpiTransaction::write(vec![0x21]),
        SpiTransaction::write(vec![0x07]),
        // a frame
        SpiTransaction::write(vec![0x20]),
        SpiTransaction::write(vec![0xaa; 504]),
    ]);
    let (dc, ce) = framed(&[Low, Low, High, Low, Low, Low, Low, High]);
    let rst = pin(&[Low, High, Low, High]);
    let light = pin(&[High, Low]);

    let mut pcd = PCD8544::new(
        spi.clone(),
        dc,
        ce,
        rst,
        light,
        MockNoop::new(),
        Config::default(),
    )
    .unwrap();

    pcd.set_instruction_set(InstructionSet::Extended, true)
        .unwrap();
    pcd.set_temperature_coefficient(TemperatureCoefficient::TC3)
        .unwrap();
    pcd.set_instruction_set(InstructionSet::Basic, true).unwrap();
    pcd.data(&[0xaa; 504]).unwrap();
    pcd.light_on().unwrap();

    let (_spi, mut dc, mut ce, mut rst, mut light, power, _delay) = pcd.release();
    assert!(power.is_none());
    spi.done();
    dc.done();
    ce.done();
    rst.done();
    light.done();
}
