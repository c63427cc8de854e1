use crate::line::StyledSegment;

const MARKER: u8 = b'*';

/// Parse `**bold**` markers into an ordered list of styled segments.
///
/// A bold span is the shortest stretch between an opening `**` and the
/// next `**` with no `*` in between. Anything that fails to pair up
/// (a lone `**`, a `*` inside a would-be span) is literal text. There
/// is no nesting and no escaping. Every input is valid.
pub fn parse(text: &str) -> Vec<StyledSegment> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] != MARKER || bytes[i + 1] != MARKER {
            i += 1;
            continue;
        }
        // Opening pair at i. The interior ends at the first marker
        // byte; the span only counts if that byte starts a closing
        // pair.
        let interior = i + 2;
        let mut j = interior;
        while j < bytes.len() && bytes[j] != MARKER {
            j += 1;
        }
        if j + 1 < bytes.len() && bytes[j + 1] == MARKER {
            if plain_start < i {
                segments.push(StyledSegment {
                    text: text[plain_start..i].to_string(),
                    bold: false,
                });
            }
            // An empty interior (`****`) still yields a bold segment;
            // it tokenizes to zero words downstream.
            segments.push(StyledSegment {
                text: text[interior..j].to_string(),
                bold: true,
            });
            i = j + 2;
            plain_start = i;
        } else {
            i += 1;
        }
    }

    if plain_start < bytes.len() {
        segments.push(StyledSegment {
            text: text[plain_start..].to_string(),
            bold: false,
        });
    }

    segments
}
