/*!

This is the long-form manual for `survey_analysis` and `survalyze`.

## Input format

Survey responses are read from an Excel (`.xlsx`) workbook, one question per
column:

| Rate the workshop from 1 to 5 | Would you come again? | Any other comments? |
|-------------------------------|-----------------------|---------------------|
| 4                             | Yes                   | Loved the pacing    |
| 5                             | Maybe                 | Nil                 |
| ...                           | ...                   | ...                 |

The first row holds the question statements. Every following non-empty cell
in a column is one response to that question. Numeric cells are accepted and
converted to their decimal text (Excel stores integers as floats); boolean,
date and error cells are rejected with their coordinates.

The i-th question declared in the configuration file reads the i-th column of
the worksheet.

## Configuration file

The run is driven by a plain text file (`config.txt` by default):

```text
Excel file name: responses.xlsx
Sheet name: Form responses 1

Words to leave out: nil, na, none, -
Summary length: 5

Report name: analysis.md
```

followed by eleven lines of free-form instructions (ignored by the program)
and then one line per question:

```text
1: demographic
2: numeric
3: categorical
4: free-response
```

The four question types:

* `demographic` identifies the respondent; the responses are not analyzed.
* `numeric` expects every response to be an integer. Reported with a
  frequency table, mode, mean and median.
* `categorical` responses are drawn from a fixed set of choices. Reported
  with a frequency table and mode.
* `free-response` free-form text, condensed into an extractive summary.
  Responses matching one of the words to leave out (after removing
  punctuation and ignoring case) are dropped first.

## Outputs

Each run prints one block per question to the console and writes the same
content to the Markdown report named in the configuration. Questions with a
frequency table also name the pie chart file associated with the question
(`Q<number>_pie.png`).

With `--out`, a machine-readable JSON summary of the whole run is written as
well; with `--reference`, the summary is compared against a reference file
and the run fails on any difference. This is how the integration tests pin
the output of the program.

*/
