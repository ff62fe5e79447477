//! End-code catalog.
//!
//! Data taken from Omron document Cat. No. W342-E1-15, pages 155-161.
//! `0x0000` is normal completion; every other code carries a category and a
//! reason. Codes absent from the catalog render as
//! `End code: 0x..: unknown`.

use std::borrow::Cow;

/// End code: normal completion.
pub const END_CODE_NORMAL_COMPLETION: u16 = 0x0000;
/// End code: normal completion; service was interrupted.
pub const END_CODE_SERVICE_INTERRUPTED: u16 = 0x0001;
/// End code: local node error; local node not in network.
pub const END_CODE_LOCAL_NODE_NOT_IN_NETWORK: u16 = 0x0101;
/// End code: local node error; token timeout.
pub const END_CODE_TOKEN_TIMEOUT: u16 = 0x0102;
/// End code: local node error; retries failed.
pub const END_CODE_RETRIES_FAILED: u16 = 0x0103;
/// End code: local node error; too many send frames.
pub const END_CODE_TOO_MANY_SEND_FRAMES: u16 = 0x0104;
/// End code: local node error; node address range error.
pub const END_CODE_NODE_ADDRESS_RANGE_ERROR: u16 = 0x0105;
/// End code: local node error; node address range duplication.
pub const END_CODE_NODE_ADDRESS_RANGE_DUPLICATION: u16 = 0x0106;
/// End code: destination node error; destination node not in network.
pub const END_CODE_DESTINATION_NODE_NOT_IN_NETWORK: u16 = 0x0201;
/// End code: destination node error; unit missing.
pub const END_CODE_UNIT_MISSING: u16 = 0x0202;
/// End code: destination node error; third node missing.
pub const END_CODE_THIRD_NODE_MISSING: u16 = 0x0203;
/// End code: destination node error; destination node busy.
pub const END_CODE_DESTINATION_NODE_BUSY: u16 = 0x0204;
/// End code: destination node error; response timeout.
pub const END_CODE_RESPONSE_TIMEOUT: u16 = 0x0205;
/// End code: controller error; communication controller error.
pub const END_CODE_COMMUNICATIONS_CONTROLLER_ERROR: u16 = 0x0301;
/// End code: controller error; CPU unit error.
pub const END_CODE_CPU_UNIT_ERROR: u16 = 0x0302;
/// End code: controller error; controller error.
pub const END_CODE_CONTROLLER_ERROR: u16 = 0x0303;
/// End code: controller error; unit number error.
pub const END_CODE_UNIT_NUMBER_ERROR: u16 = 0x0304;
/// End code: service unsupported; undefined command.
pub const END_CODE_UNDEFINED_COMMAND: u16 = 0x0401;
/// End code: service unsupported; not supported by model version.
pub const END_CODE_NOT_SUPPORTED_BY_MODEL_VERSION: u16 = 0x0402;
/// End code: routing table error; destination address setting error.
pub const END_CODE_DESTINATION_ADDRESS_SETTING_ERROR: u16 = 0x0501;
/// End code: routing table error; no routing tables.
pub const END_CODE_NO_ROUTING_TABLES: u16 = 0x0502;
/// End code: routing table error; routing table error.
pub const END_CODE_ROUTING_TABLE_ERROR: u16 = 0x0503;
/// End code: routing table error; too many relays.
pub const END_CODE_TOO_MANY_RELAYS: u16 = 0x0504;
/// End code: command format error; command too long.
pub const END_CODE_COMMAND_TOO_LONG: u16 = 0x1001;
/// End code: command format error; command too short.
pub const END_CODE_COMMAND_TOO_SHORT: u16 = 0x1002;
/// End code: command format error; elements/data don't match.
pub const END_CODE_ELEMENTS_DATA_DONT_MATCH: u16 = 0x1003;
/// End code: command format error; command format error.
pub const END_CODE_COMMAND_FORMAT_ERROR: u16 = 0x1004;
/// End code: command format error; header error.
pub const END_CODE_HEADER_ERROR: u16 = 0x1005;
/// End code: parameter error; classification missing.
pub const END_CODE_AREA_CLASSIFICATION_MISSING: u16 = 0x1101;
/// End code: parameter error; access size error.
pub const END_CODE_ACCESS_SIZE_ERROR: u16 = 0x1102;
/// End code: parameter error; address range error.
pub const END_CODE_ADDRESS_RANGE_ERROR: u16 = 0x1103;
/// End code: parameter error; address range exceeded.
pub const END_CODE_ADDRESS_RANGE_EXCEEDED: u16 = 0x1104;
/// End code: parameter error; program missing.
pub const END_CODE_PROGRAM_MISSING: u16 = 0x1106;
/// End code: parameter error; relational error.
pub const END_CODE_RELATIONAL_ERROR: u16 = 0x1109;
/// End code: parameter error; duplicate data access.
pub const END_CODE_DUPLICATE_DATA_ACCESS: u16 = 0x110a;
/// End code: parameter error; response too big.
pub const END_CODE_RESPONSE_TOO_BIG: u16 = 0x110b;
/// End code: parameter error.
pub const END_CODE_PARAMETER_ERROR: u16 = 0x110c;
/// End code: read not possible; protected.
pub const END_CODE_READ_NOT_POSSIBLE_PROTECTED: u16 = 0x2002;
/// End code: read not possible; table missing.
pub const END_CODE_READ_NOT_POSSIBLE_TABLE_MISSING: u16 = 0x2003;
/// End code: read not possible; data missing.
pub const END_CODE_READ_NOT_POSSIBLE_DATA_MISSING: u16 = 0x2004;
/// End code: read not possible; program missing.
pub const END_CODE_READ_NOT_POSSIBLE_PROGRAM_MISSING: u16 = 0x2005;
/// End code: read not possible; file missing.
pub const END_CODE_READ_NOT_POSSIBLE_FILE_MISSING: u16 = 0x2006;
/// End code: read not possible; data mismatch.
pub const END_CODE_READ_NOT_POSSIBLE_DATA_MISMATCH: u16 = 0x2007;
/// End code: write not possible; read only.
pub const END_CODE_WRITE_NOT_POSSIBLE_READ_ONLY: u16 = 0x2101;
/// End code: write not possible; write protected.
pub const END_CODE_WRITE_NOT_POSSIBLE_PROTECTED: u16 = 0x2102;
/// End code: write not possible; cannot register.
pub const END_CODE_WRITE_NOT_POSSIBLE_CANNOT_REGISTER: u16 = 0x2103;
/// End code: write not possible; program missing.
pub const END_CODE_WRITE_NOT_POSSIBLE_PROGRAM_MISSING: u16 = 0x2105;
/// End code: write not possible; file missing.
pub const END_CODE_WRITE_NOT_POSSIBLE_FILE_MISSING: u16 = 0x2106;
/// End code: write not possible; file name already exists.
pub const END_CODE_WRITE_NOT_POSSIBLE_FILE_NAME_ALREADY_EXISTS: u16 = 0x2107;
/// End code: write not possible; cannot change.
pub const END_CODE_WRITE_NOT_POSSIBLE_CANNOT_CHANGE: u16 = 0x2108;
/// End code: not executable in current mode; during execution.
pub const END_CODE_NOT_EXECUTABLE_DURING_EXECUTION: u16 = 0x2201;
/// End code: not executable in current mode; while running.
pub const END_CODE_NOT_EXECUTABLE_WHILE_RUNNING: u16 = 0x2202;
/// End code: not executable in current mode; PLC is in PROGRAM mode.
pub const END_CODE_NOT_EXECUTABLE_IN_PROGRAM_MODE: u16 = 0x2203;
/// End code: not executable in current mode; PLC is in DEBUG mode.
pub const END_CODE_NOT_EXECUTABLE_IN_DEBUG_MODE: u16 = 0x2204;
/// End code: not executable in current mode; PLC is in MONITOR mode.
pub const END_CODE_NOT_EXECUTABLE_IN_MONITOR_MODE: u16 = 0x2205;
/// End code: not executable in current mode; PLC is in RUN mode.
pub const END_CODE_NOT_EXECUTABLE_IN_RUN_MODE: u16 = 0x2206;
/// End code: not executable in current mode; specified node is not polling node.
pub const END_CODE_NOT_EXECUTABLE_NODE_NOT_POLLING_NODE: u16 = 0x2207;
/// End code: not executable in current mode; step cannot be executed.
pub const END_CODE_NOT_EXECUTABLE_STEP_CANNOT_BE_EXECUTED: u16 = 0x2208;
/// End code: no such device; file device missing.
pub const END_CODE_NO_SUCH_DEVICE_FILE_DEVICE_MISSING: u16 = 0x2301;
/// End code: no such device; memory missing.
pub const END_CODE_NO_SUCH_DEVICE_MEMORY_MISSING: u16 = 0x2302;
/// End code: no such device; clock missing.
pub const END_CODE_NO_SUCH_DEVICE_CLOCK_MISSING: u16 = 0x2303;
/// End code: cannot start/stop; table missing.
pub const END_CODE_CANNOT_START_STOP_TABLE_MISSING: u16 = 0x2401;
/// End code: unit error; memory error.
pub const END_CODE_UNIT_ERROR_MEMORY_ERROR: u16 = 0x2502;
/// End code: unit error; IO error.
pub const END_CODE_UNIT_ERROR_IO_ERROR: u16 = 0x2503;
/// End code: unit error; too many IO points.
pub const END_CODE_UNIT_ERROR_TOO_MANY_IO_POINTS: u16 = 0x2504;
/// End code: unit error; CPU bus error.
pub const END_CODE_UNIT_ERROR_CPU_BUS_ERROR: u16 = 0x2505;
/// End code: unit error; IO duplication.
pub const END_CODE_UNIT_ERROR_IO_DUPLICATION: u16 = 0x2506;
/// End code: unit error; IO bus error.
pub const END_CODE_UNIT_ERROR_IO_BUS_ERROR: u16 = 0x2507;
/// End code: unit error; SYSMAC BUS/2 error.
pub const END_CODE_UNIT_ERROR_SYSMAC_BUS2_ERROR: u16 = 0x2509;
/// End code: unit error; CPU bus unit error.
pub const END_CODE_UNIT_ERROR_CPU_BUS_UNIT_ERROR: u16 = 0x250a;
/// End code: unit error; SYSMAC bus number duplication.
pub const END_CODE_UNIT_ERROR_SYSMAC_BUS_NUMBER_DUPLICATION: u16 = 0x250d;
/// End code: unit error; memory status error.
pub const END_CODE_UNIT_ERROR_MEMORY_STATUS_ERROR: u16 = 0x250f;
/// End code: unit error; SYSMAC bus terminator missing.
pub const END_CODE_UNIT_ERROR_SYSMAC_BUS_TERMINATOR_MISSING: u16 = 0x2510;
/// End code: command error; no protection.
pub const END_CODE_COMMAND_ERROR_NO_PROTECTION: u16 = 0x2601;
/// End code: command error; incorrect password.
pub const END_CODE_COMMAND_ERROR_INCORRECT_PASSWORD: u16 = 0x2602;
/// End code: command error; protected.
pub const END_CODE_COMMAND_ERROR_PROTECTED: u16 = 0x2604;
/// End code: command error; service already executing.
pub const END_CODE_COMMAND_ERROR_SERVICE_ALREADY_EXECUTING: u16 = 0x2605;
/// End code: command error; service stopped.
pub const END_CODE_COMMAND_ERROR_SERVICE_STOPPED: u16 = 0x2606;
/// End code: command error; no execution right.
pub const END_CODE_COMMAND_ERROR_NO_EXECUTION_RIGHT: u16 = 0x2607;
/// End code: command error; settings not complete.
pub const END_CODE_COMMAND_ERROR_SETTINGS_NOT_COMPLETE: u16 = 0x2608;
/// End code: command error; necessary items not set.
pub const END_CODE_COMMAND_ERROR_NECESSARY_ITEMS_NOT_SET: u16 = 0x2609;
/// End code: command error; number already defined.
pub const END_CODE_COMMAND_ERROR_NUMBER_ALREADY_DEFINED: u16 = 0x260a;
/// End code: command error; error will not clear.
pub const END_CODE_COMMAND_ERROR_ERROR_WILL_NOT_CLEAR: u16 = 0x260b;
/// End code: access write error; no access right.
pub const END_CODE_ACCESS_WRITE_ERROR_NO_ACCESS_RIGHT: u16 = 0x3001;
/// End code: abort; service aborted.
pub const END_CODE_ABORT_SERVICE_ABORTED: u16 = 0x4001;

/// Returns the catalog message for an end code.
///
/// # Example
///
/// ```
/// use fins_udp::end_code_message;
///
/// assert_eq!(
///     end_code_message(0x0000),
///     "end code 0x0000: normal completion"
/// );
/// assert_eq!(end_code_message(0xBEEF), "End code: 0xbeef: unknown");
/// ```
pub fn end_code_message(code: u16) -> Cow<'static, str> {
    let msg = match code {
        0x0000 => "end code 0x0000: normal completion",
        0x0001 => "end code 0x0001: normal completion; service was interrupted",
        0x0101 => "end code 0x0101: local node error; local node not in network",
        0x0102 => "end code 0x0102: local node error; token timeout",
        0x0103 => "end code 0x0103: local node error; retries failed",
        0x0104 => "end code 0x0104: local node error; too many send frames",
        0x0105 => "end code 0x0105: local node error; node address range error",
        0x0106 => "end code 0x0106: local node error; node address range duplication",
        0x0201 => "end code 0x0201: destination node error; destination node not in network",
        0x0202 => "end code 0x0202: destination node error; unit missing",
        0x0203 => "end code 0x0203: destination node error; third node missing",
        0x0204 => "end code 0x0204: destination node error; destination node busy",
        0x0205 => "end code 0x0205: destination node error; response timeout",
        0x0301 => "end code 0x0301: controller error; communication controller error",
        0x0302 => "end code 0x0302: controller error; CPU unit error",
        0x0303 => "end code 0x0303: controller error; controller error",
        0x0304 => "end code 0x0304: controller error; unit number error",
        0x0401 => "end code 0x0401: service unsupported; undefined command",
        0x0402 => "end code 0x0402: service unsupported; not supported by model version",
        0x0501 => "end code 0x0501: routing table error; destination address setting error",
        0x0502 => "end code 0x0502: routing table error; no routing tables",
        0x0503 => "end code 0x0503: routing table error; routing table error",
        0x0504 => "end code 0x0504: routing table error; too many relays",
        0x1001 => "end code 0x1001: command format error; command too long",
        0x1002 => "end code 0x1002: command format error; command too short",
        0x1003 => "end code 0x1003: command format error; elements/data don't match",
        0x1004 => "end code 0x1004: command format error; command format error",
        0x1005 => "end code 0x1005: command format error; header error",
        0x1101 => "end code 0x1101: parameter error; classification missing",
        0x1102 => "end code 0x1102: parameter error; access size error",
        0x1103 => "end code 0x1103: parameter error; address range error",
        0x1104 => "end code 0x1104: parameter error; address range exceeded",
        0x1106 => "end code 0x1106: parameter error; program missing",
        0x1109 => "end code 0x1109: parameter error; relational error",
        0x110a => "end code 0x110a: parameter error; duplicate data access",
        0x110b => "end code 0x110b: parameter error; response too big",
        0x110c => "end code 0x110c: parameter error",
        0x2002 => "end code 0x2002: read not possible; protected",
        0x2003 => "end code 0x2003: read not possible; table missing",
        0x2004 => "end code 0x2004: read not possible; data missing",
        0x2005 => "end code 0x2005: read not possible; program missing",
        0x2006 => "end code 0x2006: read not possible; file missing",
        0x2007 => "end code 0x2007: read not possible; data mismatch",
        0x2101 => "end code 0x2101: write not possible; read only",
        0x2102 => "end code 0x2102: write not possible; write protected",
        0x2103 => "end code 0x2103: write not possible; cannot register",
        0x2105 => "end code 0x2105: write not possible; program missing",
        0x2106 => "end code 0x2106: write not possible; file missing",
        0x2107 => "end code 0x2107: write not possible; file name already exists",
        0x2108 => "end code 0x2108: write not possible; cannot change",
        0x2201 => "end code 0x2201: not executable in current mode during execution",
        0x2202 => "end code 0x2202: not executable in current mode while running",
        0x2203 => "end code 0x2203: not executable in current mode; PLC is in PROGRAM mode",
        0x2204 => "end code 0x2204: not executable in current mode; PLC is in DEBUG mode",
        0x2205 => "end code 0x2205: not executable in current mode; PLC is in MONITOR mode",
        0x2206 => "end code 0x2206: not executable in current mode; PLC is in RUN mode",
        0x2207 => "end code 0x2207: not executable in current mode; specified node is not polling node",
        0x2208 => "end code 0x2208: not executable in current mode; step cannot be executed",
        0x2301 => "end code 0x2301: no such device; file device missing",
        0x2302 => "end code 0x2302: no such device; memory missing",
        0x2303 => "end code 0x2303: no such device; clock missing",
        0x2401 => "end code 0x2401: cannot start/stop; table missing",
        0x2502 => "end code 0x2502: unit error; memory error",
        0x2503 => "end code 0x2503: unit error; IO error",
        0x2504 => "end code 0x2504: unit error; too many IO points",
        0x2505 => "end code 0x2505: unit error; CPU bus error",
        0x2506 => "end code 0x2506: unit error; IO duplication",
        0x2507 => "end code 0x2507: unit error; IO bus error",
        0x2509 => "end code 0x2509: unit error; SYSMAC BUS/2 error",
        0x250a => "end code 0x250a: unit error; CPU bus unit error",
        0x250d => "end code 0x250d: unit error; SYSMAC bus number duplication",
        0x250f => "end code 0x250f: unit error; memory status error",
        0x2510 => "end code 0x2510: unit error; SYSMAC bus terminator missing",
        0x2601 => "end code 0x2601: command error; no protection",
        0x2602 => "end code 0x2602: command error; incorrect password",
        0x2604 => "end code 0x2604: command error; protected",
        0x2605 => "end code 0x2605: command error; service already executing",
        0x2606 => "end code 0x2606: command error; service stopped",
        0x2607 => "end code 0x2607: command error; no execution right",
        0x2608 => "end code 0x2608: command error; settings not complete",
        0x2609 => "end code 0x2609: command error; necessary items not set",
        0x260a => "end code 0x260a: command error; number already defined",
        0x260b => "end code 0x260b: command error; error will not clear",
        0x3001 => "end code 0x3001: access write error; no access right",
        0x4001 => "end code 0x4001: abort; service aborted",
        _ => return Cow::Owned(format!("End code: 0x{code:x}: unknown")),
    };
    Cow::Borrowed(msg)
}
