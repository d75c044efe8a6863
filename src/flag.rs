pub struct Flag;
#[allow(dead_code)]
impl Flag {
    pub const DATA_ENTRY_INCRY_INCRX: u8 = 0b11;
    pub const INTERNAL_TEMP_SENSOR: u8 = 0x80;
    pub const BORDER_WAVEFORM_VBD_WHITE: u8 = 0x01;
    pub const DISPLAY_MODE_LOAD_TEMP_1: u8 = 0xF7;
    pub const DEEP_SLEEP_MODE_2: u8 = 0x03;
    /// Gate scanning bits for DRIVER_OUTPUT_CTRL (interlaced)
    pub const GATE_SCAN_INTERLACED: u8 = 0x02;
}
